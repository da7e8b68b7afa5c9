//! Debouncing of file change events.
//!
//! Editors and importers often write a file several times in quick
//! succession; a path is only reported once it has been quiet for a while.

use crate::store::AssetPath;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Debounces change events by asset path.
#[derive(Debug)]
pub struct Debouncer {
    /// Pending changes: path -> last change timestamp.
    pending: HashMap<AssetPath, Instant>,
    /// How long a path must be stable before it is reported.
    duration: Duration,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: HashMap::new(),
            duration: Duration::from_millis(debounce_ms),
        }
    }

    /// Record a change, resetting the timer for this path.
    pub fn record(&mut self, path: AssetPath) {
        self.pending.insert(path, Instant::now());
    }

    /// Forget a path (e.g. it was deleted before settling).
    pub fn remove(&mut self, path: &AssetPath) {
        self.pending.remove(path);
    }

    /// Take every path that has been stable for the debounce duration.
    ///
    /// Returned paths are sorted so batches are reproducible.
    pub fn take_ready(&mut self) -> Vec<AssetPath> {
        let now = Instant::now();
        let mut ready = Vec::new();

        self.pending.retain(|path, last_change| {
            if now.duration_since(*last_change) >= self.duration {
                ready.push(path.clone());
                false
            } else {
                true
            }
        });

        ready.sort();
        ready
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
