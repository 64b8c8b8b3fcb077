// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub list_file: PathBuf,        // master page list (one URL per line)
    pub urls: Option<Vec<String>>, // explicit URLs override the list file
    pub out: PathBuf,              // output artifact path
    pub pretty: bool,              // pretty-print the output JSON
    pub refresh: bool,             // ignore the page cache and re-fetch
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            list_file: PathBuf::from(DEFAULT_LIST_FILE),
            urls: None,
            out: PathBuf::from(DEFAULT_OUT_FILE),
            pretty: false,
            refresh: false,
        }
    }
}

impl RunOptions {
    pub fn cache_path() -> PathBuf {
        PathBuf::from(CACHE_DIR).join(PAGES_CACHE_FILE)
    }
}
