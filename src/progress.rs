// src/progress.rs
/// Lightweight progress reporting used by long-running operations
/// (fetching, conversion). Frontends implement this to surface status.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (e.g., a page was fetched).
    fn item_done(&mut self, _url: &str) {}

    /// Called when one unit fails; the run continues without it.
    fn item_failed(&mut self, _url: &str, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
