//! Row dispatching.
//!
//! Rows are split into partitions, each partition is geocoded by its own
//! worker task, and every success is routed back to its row through a
//! `CoordinateSink`. All workers share one `ConcurrencyLimiter`.
//!
//! What a worker does after a failed lookup is decided by `FailurePolicy`:
//! with `AbortPartition` it stops and leaves the rest of its partition
//! unwritten, with `SkipRow` it moves on to the next row. Either way the
//! other workers are not affected.

mod partition;
mod worker;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use log::error;

use crate::config::FailurePolicy;
use crate::error_handling::FailureStats;
use crate::geocode::{Coordinates, Geocoder};
use crate::limiter::ConcurrencyLimiter;

pub use partition::partition_rows;
use worker::{run_worker, WorkerContext};

/// One address to geocode and the worksheet row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub row_index: usize,
    pub address: String,
}

impl AddressRow {
    pub fn new(row_index: usize, address: impl Into<String>) -> Self {
        AddressRow {
            row_index,
            address: address.into(),
        }
    }
}

/// Receives successful lookups, keyed by row index.
pub trait CoordinateSink: Send + Sync + 'static {
    fn write(&self, row_index: usize, coordinates: Coordinates);
}

/// How a single worker's partition went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerOutcome {
    pub worker: usize,
    /// Rows in the partition
    pub assigned: usize,
    /// Rows handed to the sink
    pub geocoded: usize,
    /// Rows whose lookup failed
    pub failed: usize,
    /// Rows never attempted because the worker stopped early
    pub abandoned: usize,
    /// The worker stopped before the end of its partition
    pub aborted: bool,
    /// The worker task panicked; counters are unknown
    pub panicked: bool,
    /// Row indices whose lookup failed, in processing order
    pub failed_rows: Vec<usize>,
}

impl WorkerOutcome {
    fn new(worker: usize, assigned: usize) -> Self {
        WorkerOutcome {
            worker,
            assigned,
            ..Default::default()
        }
    }
}

/// Result of a full dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    pub workers: Vec<WorkerOutcome>,
}

impl DispatchSummary {
    pub fn assigned(&self) -> usize {
        self.workers.iter().map(|w| w.assigned).sum()
    }

    pub fn geocoded(&self) -> usize {
        self.workers.iter().map(|w| w.geocoded).sum()
    }

    pub fn failed(&self) -> usize {
        self.workers.iter().map(|w| w.failed).sum()
    }

    pub fn abandoned(&self) -> usize {
        self.workers.iter().map(|w| w.abandoned).sum()
    }

    pub fn aborted_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.aborted).count()
    }
}

/// Fans rows out to a fixed number of workers.
pub struct RowDispatcher {
    workers: usize,
    policy: FailurePolicy,
    stats: Arc<FailureStats>,
    attempted: Arc<AtomicUsize>,
}

impl RowDispatcher {
    /// Creates a dispatcher with `workers` partitions (at least one).
    pub fn new(workers: usize, policy: FailurePolicy) -> Self {
        RowDispatcher {
            workers: workers.max(1),
            policy,
            stats: Arc::new(FailureStats::new()),
            attempted: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Failure counters shared by all workers, for the latest `run`.
    pub fn failure_stats(&self) -> Arc<FailureStats> {
        Arc::clone(&self.stats)
    }

    /// Number of lookups attempted so far in the current `run`, for progress
    /// reporting.
    pub fn progress(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.attempted)
    }

    /// Geocodes `rows` and returns once every worker has finished.
    ///
    /// Each row is looked up at most once. A worker that panics is logged and
    /// reported in the summary; the other workers still run to completion.
    /// Failure and progress counters start from zero on every call.
    pub async fn run<G, S>(
        &self,
        rows: Vec<AddressRow>,
        client: Arc<G>,
        limiter: &ConcurrencyLimiter,
        sink: Arc<S>,
    ) -> DispatchSummary
    where
        G: Geocoder,
        S: CoordinateSink,
    {
        self.stats.reset();
        self.attempted.store(0, Ordering::SeqCst);

        let partitions = partition_rows(rows, self.workers);
        let assigned: Vec<usize> = partitions.iter().map(Vec::len).collect();

        let handles: Vec<_> = partitions
            .into_iter()
            .enumerate()
            .map(|(worker, rows)| {
                let ctx = WorkerContext {
                    worker,
                    client: Arc::clone(&client),
                    limiter: limiter.clone(),
                    sink: Arc::clone(&sink),
                    policy: self.policy,
                    stats: Arc::clone(&self.stats),
                    attempted: Arc::clone(&self.attempted),
                };
                tokio::spawn(run_worker(ctx, rows))
            })
            .collect();

        let results = join_all(handles).await;
        let workers = results
            .into_iter()
            .enumerate()
            .map(|(worker, result)| match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Worker {worker} did not complete: {e}");
                    WorkerOutcome {
                        aborted: true,
                        panicked: true,
                        ..WorkerOutcome::new(worker, assigned[worker])
                    }
                }
            })
            .collect();

        DispatchSummary { workers }
    }
}
