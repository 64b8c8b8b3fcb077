// src/reader.rs
//
// The page source: turns a list of documentation URLs into compat-section
// HTML, via the durable page cache or a small worker pool of polite HTTP
// fetches.
//
// Fetching a section is a two-step dance: the page's `$json` metadata
// names its sections (the compat one is sometimes `Browser_Compatibility`
// and sometimes `Browser_compatibility`), then the section itself is
// fetched with `?raw&macros&section=<id>`.

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::config::consts::{JITTER_MS, REQUEST_PAUSE_MS, WORKERS};
use crate::core::net;
use crate::progress::Progress;
use crate::store::PageCache;

/// What we ended up with for one URL.
pub enum Fetched {
    /// Compat-section HTML, from cache or the wire.
    Section(String),
    /// The page exists but has no compat section.
    NoSection,
    /// Fetch failed; the page is skipped this run and not cached.
    Failed(String),
}

/// Read the master page list: one URL per line, `#` comments and blank
/// lines ignored.
pub fn read_page_list(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read page list {}: {}", path.display(), e))?;
    Ok(unique(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect(),
    ))
}

/// Drop repeated URLs, keeping first-occurrence order. Repeats need not
/// be adjacent; hand-maintained page lists accumulate them anywhere.
pub fn unique(urls: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}

/// Resolve every URL to a `Fetched`, in input order. Cache hits are
/// served directly; misses go through the worker pool. The cache is
/// saved once after the pool drains.
pub fn fetch_pages(
    urls: &[String],
    cache: &mut PageCache,
    refresh: bool,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<(String, Fetched)>, Box<dyn Error>> {
    let todo = unique(
        urls.iter()
            .filter(|u| refresh || !cache.contains(u))
            .cloned()
            .collect(),
    );

    let mut failures: BTreeMap<String, String> = BTreeMap::new();

    if !todo.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(todo.len());
            p.log(&format!(
                "fetching {} pages ({} already cached)",
                todo.len(),
                urls.len() - todo.len()
            ));
        }

        let ids = Arc::new(todo);
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(String, Result<Option<String>, String>)>();

        let workers = WORKERS.min(ids.len()).max(1);
        for _ in 0..workers {
            let ids = Arc::clone(&ids);
            let idx = Arc::clone(&counter);
            let tx = tx.clone();

            thread::spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let url = ids[i].clone();
                    let result = fetch_compat_section(&url).map_err(|e| e.to_string());
                    let _ = tx.send((url, result));
                    let jitter = (i as u64) % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            });
        }
        drop(tx); // main thread is sole receiver now

        for _ in 0..ids.len() {
            match rx.recv() {
                Ok((url, Ok(section))) => {
                    cache.put(&url, section);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&url);
                    }
                }
                Ok((url, Err(msg))) => {
                    loge!("{}: {}", url, msg);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&url, &msg);
                    }
                    failures.insert(url, msg);
                }
                Err(_) => break, // workers ended early; bail gracefully
            }
        }
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }

        cache.save()?;
    }

    let mut out = Vec::with_capacity(urls.len());
    for url in urls {
        let item = if let Some(msg) = failures.get(url) {
            Fetched::Failed(msg.clone())
        } else {
            match cache.get(url) {
                Some(Some(html)) => Fetched::Section(html.clone()),
                Some(None) => Fetched::NoSection,
                None => Fetched::Failed("not fetched".to_string()),
            }
        };
        out.push((url.clone(), item));
    }
    Ok(out)
}

fn fetch_compat_section(url: &str) -> Result<Option<String>, Box<dyn Error>> {
    let (host, path) = net::split_url(url)?;
    let meta = net::http_get(&host, &format!("{}$json", path))?;
    let Some(section) = find_compat_section_id(&meta)? else {
        return Ok(None);
    };
    let html = net::http_get(&host, &format!("{}?raw&macros&section={}", path, section))?;
    Ok(Some(html))
}

fn find_compat_section_id(meta: &str) -> Result<Option<String>, Box<dyn Error>> {
    let v: Value = serde_json::from_str(meta)?;
    let Some(sections) = v.get("sections").and_then(Value::as_array) else {
        return Ok(None);
    };
    for section in sections {
        let id = section.get("id").and_then(Value::as_str).unwrap_or("");
        let title = section.get("title").and_then(Value::as_str).unwrap_or("");
        if id.eq_ignore_ascii_case("browser_compatibility")
            || title.eq_ignore_ascii_case("browser compatibility")
        {
            return Ok(Some(id.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_drops_non_adjacent_repeats() {
        let urls = vec![
            "https://example.org/a".to_string(),
            "https://example.org/b".to_string(),
            "https://example.org/a".to_string(),
        ];
        assert_eq!(
            unique(urls),
            ["https://example.org/a", "https://example.org/b"]
        );
    }

    #[test]
    fn page_list_skips_comments_and_repeats() {
        let path = std::env::temp_dir()
            .join(format!("compat-scrape-list-{}.txt", std::process::id()));
        std::fs::write(
            &path,
            "# comment\nhttps://example.org/a\n\nhttps://example.org/b\nhttps://example.org/a\n",
        )
        .unwrap();

        let urls = read_page_list(&path).unwrap();
        assert_eq!(urls, ["https://example.org/a", "https://example.org/b"]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn section_id_found_by_id_or_title() {
        let meta = r#"{"sections":[
            {"id":"Summary","title":"Summary"},
            {"id":"Browser_Compatibility","title":"Browser compatibility"}
        ]}"#;
        assert_eq!(
            find_compat_section_id(meta).unwrap().as_deref(),
            Some("Browser_Compatibility")
        );

        let meta2 = r#"{"sections":[{"id":"Specs","title":"Specifications"}]}"#;
        assert!(find_compat_section_id(meta2).unwrap().is_none());
    }
}
