//! Progress logging utilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Logs how many lookups have been attempted and the current rate.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `attempted` - Atomic counter of attempted lookups
/// * `total` - Rows queued for the run
pub fn log_progress(start_time: Instant, attempted: &Arc<AtomicUsize>, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = attempted.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Geocoded {}/{} rows in {:.2} seconds (~{:.2} rows/sec)",
        done, total, elapsed_secs, rate
    );
}

/// Spawns a task that calls `log_progress` every `interval` until cancelled.
pub fn spawn_progress_logger(
    start_time: Instant,
    attempted: Arc<AtomicUsize>,
    total: usize,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => log_progress(start_time, &attempted, total),
            }
        }
    })
}
