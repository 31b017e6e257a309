//! Source port
//!
//! Defines the interface for fetching the upstream JSON payload.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

use crate::error::IngestError;

/// Port for retrieving the raw upstream document
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SourcePort: Send + Sync {
    /// Issue a single request to `url` and return the response body
    ///
    /// Implementations report every failure as `IngestError::Fetch`.
    async fn fetch(&self, url: &str) -> Result<Bytes, IngestError>;
}
