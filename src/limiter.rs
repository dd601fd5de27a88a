//! Bounded concurrency for geocoding lookups.
//!
//! A single `ConcurrencyLimiter` is shared by every worker, whichever partition
//! it serves. Waiters are queued first-come-first-served by the underlying
//! `tokio::sync::Semaphore`.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Right to perform one lookup.
///
/// The slot is returned to the limiter when the permit is dropped, so a
/// worker that stops early (error, panic) cannot leak capacity.
#[derive(Debug)]
pub struct Permit {
    _inner: OwnedSemaphorePermit,
}

/// Caps the number of lookups in flight across all workers.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter with `capacity` slots. A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        ConcurrencyLimiter {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free and takes it.
    ///
    /// # Errors
    ///
    /// Fails only after `close` has been called.
    pub async fn acquire(&self) -> Result<Permit, AcquireError> {
        let inner = Arc::clone(&self.semaphore).acquire_owned().await?;
        Ok(Permit { _inner: inner })
    }

    /// Returns a slot to the limiter.
    pub fn release(&self, permit: Permit) {
        drop(permit);
    }

    /// Stops handing out permits; pending and future `acquire` calls fail.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
