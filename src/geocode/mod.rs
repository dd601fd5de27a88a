//! Address-to-coordinate lookups.
//!
//! This module provides:
//! - `Coordinates`, the result of a successful lookup
//! - The `Geocoder` trait the dispatcher drives
//! - `OpenCageClient`, the HTTP implementation
//! - Response parsing for the OpenCage JSON format

mod client;
mod response;

use std::future::Future;

use crate::error_handling::GeocodeError;

pub use client::OpenCageClient;
pub use response::parse_response;

/// A resolved position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }
}

/// Resolves a free-text address to coordinates.
///
/// Implementations perform exactly one attempt per call; the dispatcher owns
/// what happens after a failure.
pub trait Geocoder: Send + Sync + 'static {
    /// Looks up a single address.
    fn lookup(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Coordinates, GeocodeError>> + Send;
}
