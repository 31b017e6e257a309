//! Open-Meteo payload client
//!
//! HTTP client issuing a single GET per call against a fully-qualified
//! Open-Meteo URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Payload client errors
#[derive(Debug, Error)]
pub enum OpenMeteoError {
    /// HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// URL is empty or malformed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request failed or returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No response within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Payload client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    concat!("openmeteo-ingest/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Client trait for fetching raw payloads
#[async_trait]
pub trait PayloadClient: Send + Sync {
    /// Fetch the body at `url` with a single request
    async fn fetch_raw(&self, url: &str) -> Result<Bytes, OpenMeteoError>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, OpenMeteoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OpenMeteoError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, OpenMeteoError> {
        Self::new(OpenMeteoConfig::default())
    }

    fn validate_url(url: &str) -> Result<(), OpenMeteoError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(OpenMeteoError::InvalidUrl("URL is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(OpenMeteoError::InvalidUrl(format!(
                "unsupported scheme in {url}"
            )));
        }
        Ok(())
    }

    fn map_status(status: StatusCode) -> Result<(), OpenMeteoError> {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(OpenMeteoError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(OpenMeteoError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(OpenMeteoError::RequestFailed(format!("HTTP {status}")));
        }
        Ok(())
    }

    fn map_transport(&self, err: &reqwest::Error) -> OpenMeteoError {
        if err.is_timeout() {
            OpenMeteoError::Timeout(self.config.timeout_secs)
        } else {
            OpenMeteoError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl PayloadClient for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_raw(&self, url: &str) -> Result<Bytes, OpenMeteoError> {
        Self::validate_url(url)?;

        debug!(url = %url, "Fetching payload");

        let response = self
            .client
            .get(url.trim())
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        Self::map_status(response.status())?;

        let body = response.bytes().await.map_err(|e| self.map_transport(&e))?;
        debug!(bytes = body.len(), "Payload received");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenMeteoConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert!(config.user_agent.starts_with("openmeteo-ingest/"));
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: OpenMeteoConfig =
            serde_json::from_str(r#"{"timeout_secs": 5}"#).expect("should deserialize");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.user_agent.starts_with("openmeteo-ingest/"));
    }

    #[test]
    fn test_validate_url() {
        assert!(
            OpenMeteoClient::validate_url("https://air-quality-api.open-meteo.com/v1/air-quality")
                .is_ok()
        );
        assert!(OpenMeteoClient::validate_url("http://localhost:8080/x").is_ok());
        assert!(matches!(
            OpenMeteoClient::validate_url(""),
            Err(OpenMeteoError::InvalidUrl(_))
        ));
        assert!(matches!(
            OpenMeteoClient::validate_url("   "),
            Err(OpenMeteoError::InvalidUrl(_))
        ));
        assert!(matches!(
            OpenMeteoClient::validate_url("ftp://example.com"),
            Err(OpenMeteoError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_map_status() {
        assert!(OpenMeteoClient::map_status(StatusCode::OK).is_ok());
        assert!(matches!(
            OpenMeteoClient::map_status(StatusCode::TOO_MANY_REQUESTS),
            Err(OpenMeteoError::RateLimitExceeded)
        ));
        assert!(matches!(
            OpenMeteoClient::map_status(StatusCode::BAD_GATEWAY),
            Err(OpenMeteoError::ServiceUnavailable(_))
        ));

        let Err(OpenMeteoError::RequestFailed(msg)) =
            OpenMeteoClient::map_status(StatusCode::NOT_FOUND)
        else {
            unreachable!("Expected RequestFailed");
        };
        assert_eq!(msg, "HTTP 404 Not Found");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            OpenMeteoError::Timeout(60).to_string(),
            "Request timed out after 60s"
        );
        assert!(OpenMeteoError::RateLimitExceeded
            .to_string()
            .contains("Rate limit"));
    }

    #[test]
    fn test_client_creation() {
        let client = OpenMeteoClient::with_defaults();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_url_without_request() {
        let client = OpenMeteoClient::with_defaults().expect("client creation should succeed");
        let result = client.fetch_raw("").await;
        assert!(matches!(result, Err(OpenMeteoError::InvalidUrl(_))));
    }
}
