// src/config/consts.rs

// Net
pub const USER_AGENT: &str = "compat_scrape/0.4";

// Local cache
pub const CACHE_DIR: &str = "data/cache";
pub const PAGES_CACHE_FILE: &str = "pages.json";

// Defaults
pub const DEFAULT_LIST_FILE: &str = "data/page-list.txt";
pub const DEFAULT_OUT_FILE: &str = "data/compat-mdn.json";

// Safety guard: refuse to run while this file exists at the repo root.
// Mass-fetching MDN is not something to trigger by accident.
pub const DISABLED_GUARD: &str = ".disabled";

// Scrape
pub const DOCS_MARKER: &str = "/docs/";
// Sections shorter than this hold no usable compat table.
pub const MIN_SECTION_LEN: usize = 10;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 1000; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms
