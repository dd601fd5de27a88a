//! OpenCage response body parsing.

use serde::Deserialize;

use super::Coordinates;
use crate::error_handling::GeocodeError;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeMatch>,
}

#[derive(Debug, Deserialize)]
struct GeocodeMatch {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

/// Extracts the first result's geometry from a response body.
///
/// # Errors
///
/// - `GeocodeError::ParseFailure` if the body is not JSON or the geometry is
///   not numeric
/// - `GeocodeError::NoResult` if `results` is missing or empty, or the first
///   result has no geometry
pub fn parse_response(body: &str) -> Result<Coordinates, GeocodeError> {
    let response: GeocodeResponse = serde_json::from_str(body)?;
    let geometry = response
        .results
        .into_iter()
        .next()
        .and_then(|m| m.geometry)
        .ok_or(GeocodeError::NoResult)?;
    Ok(Coordinates::new(geometry.lat, geometry.lng))
}
