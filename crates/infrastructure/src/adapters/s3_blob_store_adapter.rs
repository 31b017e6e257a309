//! Blob store adapter - Implements BlobStorePort using S3-compatible storage
//!
//! Works against AWS S3 and any S3-compatible service, including the
//! Google Cloud Storage XML API with HMAC keys and MinIO.

use application::error::IngestError;
use application::ports::BlobStorePort;
use async_trait::async_trait;
use bytes::Bytes;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info, instrument};

use crate::config::StorageConfig;

/// Adapter writing objects through `rust-s3`
#[derive(Debug, Clone)]
pub struct S3BlobStoreAdapter {
    config: StorageConfig,
}

impl S3BlobStoreAdapter {
    /// Create a new adapter
    ///
    /// Credentials and bucket handles are resolved per write, so a missing
    /// credential surfaces as a storage failure of that run.
    #[must_use]
    pub const fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn credentials(&self) -> Result<Credentials, IngestError> {
        if self.config.has_explicit_credentials() {
            Credentials::new(
                self.config.access_key.as_deref(),
                self.config.secret_key_str(),
                None,
                None,
                None,
            )
            .map_err(|e| IngestError::storage(format!("Failed to create credentials: {e}")))
        } else {
            // Try to load from environment
            Credentials::default().map_err(|e| {
                IngestError::storage(format!(
                    "Failed to load credentials from environment \
                     (set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY): {e}"
                ))
            })
        }
    }

    fn region(&self) -> Result<Region, IngestError> {
        if self.config.endpoint.trim().is_empty() {
            self.config
                .region
                .parse()
                .map_err(|e| IngestError::storage(format!("Invalid region: {e}")))
        } else {
            Ok(Region::Custom {
                region: self.config.region.clone(),
                endpoint: self.config.endpoint.trim_end_matches('/').to_string(),
            })
        }
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, IngestError> {
        let bucket = Bucket::new(name, self.region()?, self.credentials()?)
            .map_err(|e| IngestError::storage(format!("Failed to create bucket handle: {e}")))?;

        Ok(if self.config.path_style {
            bucket.with_path_style()
        } else {
            bucket
        })
    }
}

#[async_trait]
impl BlobStorePort for S3BlobStoreAdapter {
    #[instrument(skip(self, body), fields(size = body.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), IngestError> {
        debug!(endpoint = %self.config.endpoint, "Uploading object");

        let handle = self.bucket(bucket)?;
        let response = handle
            .put_object_with_content_type(key, &body, content_type)
            .await
            .map_err(|e| IngestError::storage(format!("Upload failed: {e}")))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            return Err(IngestError::storage(format!(
                "Upload returned status {status}: {}",
                String::from_utf8_lossy(response.as_slice())
            )));
        }

        info!(url = %format!("s3://{bucket}/{key}"), "Object uploaded");
        Ok(())
    }
}
