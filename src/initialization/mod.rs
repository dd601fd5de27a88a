//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client and geocoder
//! - Concurrency limiter
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use crate::limiter::ConcurrencyLimiter;

// Re-export public API
pub use client::{init_client, init_geocoder};
pub use logger::init_logger_with;

/// Initializes the limiter that bounds in-flight lookups.
///
/// # Arguments
///
/// * `capacity` - Maximum number of concurrent lookups allowed (0 is treated as 1)
pub fn init_limiter(capacity: usize) -> ConcurrencyLimiter {
    ConcurrencyLimiter::new(capacity)
}
