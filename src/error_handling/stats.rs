//! Lookup failure statistics.
//!
//! This module provides thread-safe counters for failed lookups, broken down
//! by `FailureKind`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe failure statistics tracker.
///
/// All kinds are initialized to zero on creation, so the map never needs to
/// grow while workers are running. Share it across tasks with `Arc`.
pub struct FailureStats {
    failures: HashMap<FailureKind, AtomicUsize>,
}

impl FailureStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }
        FailureStats { failures }
    }

    /// Increment the counter for `kind`.
    pub fn increment(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map",
                kind
            );
        }
    }

    pub fn get_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sets every counter back to zero.
    pub fn reset(&self) {
        for counter in self.failures.values() {
            counter.store(0, Ordering::SeqCst);
        }
    }

    /// Sum over all kinds.
    pub fn total(&self) -> usize {
        FailureKind::iter().map(|k| self.get_count(k)).sum()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
