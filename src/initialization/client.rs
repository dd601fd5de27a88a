//! HTTP client and geocoder initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;
use url::Url;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::geocode::OpenCageClient;

/// Initializes the HTTP client used for geocoding requests.
///
/// Creates a `reqwest::Client` configured with the User-Agent and per-request
/// timeout from the configuration. A timeout of 0 is raised to one second.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Builds the production geocoder from the configured endpoint and credential.
///
/// # Errors
///
/// Returns `InitializationError::EndpointError` if the endpoint is not a URL,
/// or `InitializationError::HttpClientError` if the HTTP client cannot be built.
pub async fn init_geocoder(config: &Config) -> Result<OpenCageClient, InitializationError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| InitializationError::EndpointError(config.endpoint.clone(), e))?;
    let http = init_client(config).await?;
    Ok(OpenCageClient::new(http, endpoint, config.api_key.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_geocoder_rejects_bad_endpoint() {
        let config = Config {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        let result = init_geocoder(&config).await;
        assert!(matches!(
            result,
            Err(InitializationError::EndpointError(_, _))
        ));
    }

    #[tokio::test]
    async fn test_init_geocoder_with_defaults() {
        let config = Config {
            api_key: "k".to_string(),
            ..Default::default()
        };
        let geocoder = init_geocoder(&config).await.expect("default config is valid");
        assert_eq!(
            geocoder.endpoint().as_str(),
            "https://api.opencagedata.com/geocode/v1/json"
        );
    }
}
