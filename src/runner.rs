// src/runner.rs
//
// Batch orchestration: page list -> fetch/cache -> scrape -> convert ->
// output artifact. Errors are page-scoped; a malformed page lands in the
// skipped list and the batch keeps going.

use std::error::Error;
use std::path::PathBuf;

use crate::config::consts::MIN_SECTION_LEN;
use crate::config::options::RunOptions;
use crate::convert;
use crate::model::CompatRecord;
use crate::output;
use crate::progress::Progress;
use crate::reader::{self, Fetched};
use crate::specs;
use crate::store::PageCache;

/// Summary of what was produced.
pub struct RunSummary {
    pub written: PathBuf,
    pub converted: usize,
    /// (origin, reason) for every page left out of the batch.
    pub skipped: Vec<(String, String)>,
}

pub fn run(
    opts: &RunOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    // One record per distinct URL, whatever the list repeats.
    let urls = match &opts.urls {
        Some(list) if !list.is_empty() => reader::unique(list.clone()),
        _ => reader::read_page_list(&opts.list_file)?,
    };
    logf!("processing {} pages", urls.len());

    let mut cache = PageCache::load(&RunOptions::cache_path())?;
    let fetched = reader::fetch_pages(&urls, &mut cache, opts.refresh, progress)?;

    let mut records: Vec<CompatRecord> = Vec::new();
    let mut skipped: Vec<(String, String)> = Vec::new();

    for (url, item) in fetched {
        match item {
            Fetched::Failed(msg) => {
                skipped.push((url, msg));
            }
            Fetched::NoSection => {
                logd!("{}: no compat section", url);
                skipped.push((url, "no compat section".to_string()));
            }
            Fetched::Section(html) if html.trim().len() <= MIN_SECTION_LEN => {
                skipped.push((url, "empty compat section".to_string()));
            }
            Fetched::Section(html) => match specs::compat::scrape_table(&html) {
                Err(e) => {
                    loge!("{}: {}", url, e);
                    skipped.push((url, e.to_string()));
                }
                Ok(None) => {
                    skipped.push((url, "no compat table".to_string()));
                }
                Ok(Some(table)) => {
                    records.push(convert::convert(&table, &url));
                }
            },
        }
    }

    let written = output::write_batch(&opts.out, &records, opts.pretty)?;
    logf!(
        "wrote {} records to {} ({} pages skipped)",
        records.len(),
        written.display(),
        skipped.len()
    );

    Ok(RunSummary {
        written,
        converted: records.len(),
        skipped,
    })
}
