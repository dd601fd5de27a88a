//! HTTP geocoder against an OpenCage-compatible endpoint.

use std::sync::Arc;

use log::{info, warn};
use url::Url;

use super::{parse_response, Coordinates, Geocoder};
use crate::error_handling::GeocodeError;

/// Forward geocoder issuing `GET <endpoint>?q=<address>&key=<api_key>`.
#[derive(Clone)]
pub struct OpenCageClient {
    http: Arc<reqwest::Client>,
    endpoint: Url,
    api_key: String,
}

impl OpenCageClient {
    pub fn new(http: Arc<reqwest::Client>, endpoint: Url, api_key: String) -> Self {
        OpenCageClient {
            http,
            endpoint,
            api_key,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("q", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(redact)?;
        let body = response.text().await.map_err(redact)?;
        parse_response(&body)
    }
}

// reqwest embeds the request URL, credential included, in its errors.
fn redact(e: reqwest::Error) -> GeocodeError {
    GeocodeError::TransportFailure(e.without_url())
}

impl std::fmt::Debug for OpenCageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenCageClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Geocoder for OpenCageClient {
    async fn lookup(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        match self.fetch(address).await {
            Ok(coords) => {
                info!(
                    "Full Address: {address} -> Lat: {:.6}, Long: {:.6}",
                    coords.latitude, coords.longitude
                );
                Ok(coords)
            }
            Err(e) => {
                warn!("Full Address: {address} -> lookup failed: {e}");
                Err(e)
            }
        }
    }
}
