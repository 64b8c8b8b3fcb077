// src/store.rs
//
// Durable page cache: URL -> compat-section HTML. Pages known to have no
// compat section are recorded as null so they are not re-fetched either.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct PageCache {
    path: PathBuf,
    pages: BTreeMap<String, Option<String>>,
}

impl PageCache {
    /// Load the cache file when present. A missing file is an empty
    /// cache; a corrupt one is an error, never silently discarded.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut pages = BTreeMap::new();
        if path.exists() {
            let text = fs::read_to_string(path)?;
            pages = serde_json::from_str(&text)
                .map_err(|e| format!("corrupt page cache {}: {}", path.display(), e))?;
            logf!("using cache file containing {} pages", pages.len());
        }
        Ok(Self { path: path.to_path_buf(), pages })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&Option<String>> {
        self.pages.get(url)
    }

    pub fn put(&mut self, url: &str, section: Option<String>) {
        self.pages.insert(url.to_string(), section);
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string(&self.pages)?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Sorted URL lists: (pages with a compat section, pages without).
    pub fn partition(&self) -> (Vec<&str>, Vec<&str>) {
        let mut with = Vec::new();
        let mut without = Vec::new();
        for (url, section) in &self.pages {
            match section {
                Some(_) => with.push(url.as_str()),
                None => without.push(url.as_str()),
            }
        }
        (with, without)
    }
}
