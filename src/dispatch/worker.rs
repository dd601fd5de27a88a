//! Partition worker loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use super::{AddressRow, CoordinateSink, WorkerOutcome};
use crate::config::FailurePolicy;
use crate::error_handling::FailureStats;
use crate::geocode::Geocoder;
use crate::limiter::ConcurrencyLimiter;

/// Everything a worker shares with its siblings.
pub(super) struct WorkerContext<G, S> {
    pub worker: usize,
    pub client: Arc<G>,
    pub limiter: ConcurrencyLimiter,
    pub sink: Arc<S>,
    pub policy: FailurePolicy,
    pub stats: Arc<FailureStats>,
    pub attempted: Arc<AtomicUsize>,
}

/// Geocodes one partition in order.
///
/// The permit is held only around the lookup; writing back does not occupy a
/// limiter slot.
pub(super) async fn run_worker<G, S>(ctx: WorkerContext<G, S>, rows: Vec<AddressRow>) -> WorkerOutcome
where
    G: Geocoder,
    S: CoordinateSink,
{
    let WorkerContext {
        worker,
        client,
        limiter,
        sink,
        policy,
        stats,
        attempted,
    } = ctx;

    let mut outcome = WorkerOutcome::new(worker, rows.len());
    info!("Worker {worker}: {} rows to geocode", rows.len());

    for (position, row) in rows.iter().enumerate() {
        let permit = match limiter.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Worker {worker}: limiter closed, stopping");
                outcome.aborted = true;
                outcome.abandoned = rows.len() - position;
                break;
            }
        };
        let result = client.lookup(&row.address).await;
        limiter.release(permit);
        attempted.fetch_add(1, Ordering::SeqCst);

        match result {
            Ok(coordinates) => {
                debug!("Worker {worker}: row {} geocoded", row.row_index);
                sink.write(row.row_index, coordinates);
                outcome.geocoded += 1;
            }
            Err(e) => {
                stats.increment(e.kind());
                outcome.failed += 1;
                outcome.failed_rows.push(row.row_index);
                match policy {
                    FailurePolicy::AbortPartition => {
                        outcome.aborted = true;
                        outcome.abandoned = rows.len() - position - 1;
                        warn!(
                            "Worker {worker}: row {} failed ({e}), abandoning {} remaining rows",
                            row.row_index, outcome.abandoned
                        );
                        break;
                    }
                    FailurePolicy::SkipRow => {
                        warn!("Worker {worker}: row {} failed ({e}), skipping", row.row_index);
                    }
                }
            }
        }
    }

    info!(
        "Worker {worker}: finished ({} geocoded, {} failed, {} abandoned)",
        outcome.geocoded, outcome.failed, outcome.abandoned
    );
    outcome
}
