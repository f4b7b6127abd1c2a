// src/progress.rs
/// Progress reporting for the long-running phases (scrape/assess).
/// Frontends implement this to surface per-hero status to users;
/// every method defaults to a no-op.
pub trait Progress {
    /// Called at the start of a phase with the number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One hero finished.
    fn item_done(&mut self, _name: &str) {}

    /// One hero failed; the batch continues without it.
    fn item_failed(&mut self, _name: &str) {}

    /// Called at the end of a phase, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
