//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, workbook, run, per-address lookup)
//! - Thread-safe failure counters by kind
//!
//! Errors are split into:
//! - **Fatal**: `SheetError`, `RunError`, `InitializationError` stop the run
//! - **Local**: `GeocodeError` only affects the worker that hit it

mod stats;
mod types;

// Re-export public API
pub use stats::FailureStats;
pub use types::{FailureKind, GeocodeError, InitializationError, RunError, SheetError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_failure_stats_initialization() {
        let stats = FailureStats::new();
        for kind in FailureKind::iter() {
            assert_eq!(stats.get_count(kind), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_failure_stats_increment() {
        let stats = FailureStats::new();
        stats.increment(FailureKind::NoResult);
        stats.increment(FailureKind::NoResult);
        stats.increment(FailureKind::Transport);
        assert_eq!(stats.get_count(FailureKind::NoResult), 2);
        assert_eq!(stats.get_count(FailureKind::Transport), 1);
        assert_eq!(stats.get_count(FailureKind::Parse), 0);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_failure_stats_reset() {
        let stats = FailureStats::new();
        stats.increment(FailureKind::Parse);
        stats.increment(FailureKind::Transport);
        stats.reset();
        assert_eq!(stats.total(), 0);
        stats.increment(FailureKind::Parse);
        assert_eq!(stats.get_count(FailureKind::Parse), 1);
    }

    #[test]
    fn test_failure_stats_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(FailureStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment(FailureKind::Parse);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_count(FailureKind::Parse), 400);
    }
}
