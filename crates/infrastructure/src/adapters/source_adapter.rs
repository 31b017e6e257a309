//! Source adapter - Implements SourcePort using integration_openmeteo

use application::error::IngestError;
use application::ports::SourcePort;
use async_trait::async_trait;
use bytes::Bytes;
use integration_openmeteo::{OpenMeteoClient, OpenMeteoConfig, OpenMeteoError, PayloadClient};
use tracing::{debug, instrument};

/// Adapter fetching the upstream document through the Open-Meteo client
#[derive(Debug)]
pub struct OpenMeteoSourceAdapter {
    client: OpenMeteoClient,
}

impl OpenMeteoSourceAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, OpenMeteoError> {
        Ok(Self {
            client: OpenMeteoClient::with_defaults()?,
        })
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: OpenMeteoConfig) -> Result<Self, OpenMeteoError> {
        Ok(Self {
            client: OpenMeteoClient::new(config)?,
        })
    }

    /// Every client failure fails the fetch step
    fn map_error(err: &OpenMeteoError) -> IngestError {
        IngestError::fetch(err.to_string())
    }
}

#[async_trait]
impl SourcePort for OpenMeteoSourceAdapter {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes, IngestError> {
        let body = self
            .client
            .fetch_raw(url)
            .await
            .map_err(|e| Self::map_error(&e))?;

        debug!(bytes = body.len(), "Source payload fetched");
        Ok(body)
    }
}
