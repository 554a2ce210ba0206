use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic counter of processed paths.
///
/// Workers increment it once per dequeued path regardless of outcome; the
/// reporting task only reads it, so a display that lags by one poll
/// interval is expected and fine.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    processed: AtomicUsize,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn value(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }
}
