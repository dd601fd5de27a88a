//! End-of-run statistics.

use log::{info, warn};
use strum::IntoEnumIterator;

use crate::dispatch::DispatchSummary;
use crate::error_handling::{FailureKind, FailureStats};

/// Logs per-worker outcomes and failure counts by kind.
pub fn print_dispatch_statistics(summary: &DispatchSummary, stats: &FailureStats) {
    for outcome in &summary.workers {
        if outcome.panicked {
            warn!(
                "Worker {}: crashed, {} assigned rows in unknown state",
                outcome.worker, outcome.assigned
            );
        } else if outcome.aborted {
            warn!(
                "Worker {}: stopped early after row {:?} ({} of {} rows geocoded, {} never attempted)",
                outcome.worker,
                outcome.failed_rows.last(),
                outcome.geocoded,
                outcome.assigned,
                outcome.abandoned
            );
        } else {
            info!(
                "Worker {}: {} of {} rows geocoded",
                outcome.worker, outcome.geocoded, outcome.assigned
            );
        }
    }

    print_failure_statistics(stats);
}

/// Logs failure counts, skipping kinds that never occurred.
pub fn print_failure_statistics(stats: &FailureStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Failure Counts ({} total):", total);
    for kind in FailureKind::iter() {
        let count = stats.get_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}
