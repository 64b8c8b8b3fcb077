// src/output.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::CompatRecord;

/// Write the batch artifact: one JSON array, one element per converted
/// page, in processing order.
pub fn write_batch(
    path: &Path,
    records: &[CompatRecord],
    pretty: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    fs::write(path, json)?;
    Ok(path.to_path_buf())
}
