//! Blob store port
//!
//! Defines the interface for persisting objects in bucket storage.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;

use crate::error::IngestError;

/// Port for writing a single object to a bucket
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Store `body` under `key` in `bucket`, overwriting any existing object
    ///
    /// Returns only once the store has confirmed the write.
    /// Implementations report every failure as `IngestError::Storage`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), IngestError>;
}
