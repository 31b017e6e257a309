//! Ingest service
//!
//! Runs one ingestion: fetch the upstream document, flatten its hourly
//! series to CSV, and write the result to a dated object in blob storage.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use domain::{HourlyTable, StorageKey};
use tracing::{debug, info, instrument, warn};

use crate::error::IngestError;
use crate::ports::{BlobStorePort, SourcePort};

/// Name under which the bucket setting is reported when missing
pub const RAW_BUCKET_VAR: &str = "RAW_BUCKET";

/// Name under which the source URL setting is reported when missing
pub const SOURCE_URL_VAR: &str = "SOURCE_URL";

/// Settings for an ingestion run, built once by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSettings {
    /// Destination bucket
    pub raw_bucket: String,
    /// Upstream endpoint returning the JSON document
    pub source_url: String,
}

impl IngestSettings {
    /// Create settings from the two required values
    pub fn new(raw_bucket: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            raw_bucket: raw_bucket.into(),
            source_url: source_url.into(),
        }
    }

    /// Names of the settings that are empty, in declaration order
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (RAW_BUCKET_VAR, &self.raw_bucket),
            (SOURCE_URL_VAR, &self.source_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail with `IngestError::Configuration` if anything is missing
    pub fn validate(&self) -> Result<(), IngestError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IngestError::Configuration { missing })
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    /// Bucket written to
    pub bucket: String,
    /// Key of the written object
    pub key: StorageKey,
    /// Number of data rows, excluding the header
    pub rows: usize,
    /// Size of the written object in bytes
    pub bytes: usize,
}

impl IngestReceipt {
    /// `<bucket>/<key>`
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }
}

/// Orchestrates fetch, transform and upload for one trigger
pub struct IngestService {
    source: Arc<dyn SourcePort>,
    store: Arc<dyn BlobStorePort>,
    settings: IngestSettings,
}

impl fmt::Debug for IngestService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl IngestService {
    /// Create a new ingest service
    pub fn new(
        source: Arc<dyn SourcePort>,
        store: Arc<dyn BlobStorePort>,
        settings: IngestSettings,
    ) -> Self {
        Self {
            source,
            store,
            settings,
        }
    }

    /// Settings this service was built with
    #[must_use]
    pub fn settings(&self) -> &IngestSettings {
        &self.settings
    }

    /// Run one ingestion stamped with the current UTC time
    pub async fn ingest(&self) -> Result<IngestReceipt, IngestError> {
        self.ingest_at(Utc::now()).await
    }

    /// Run one ingestion stamped with `now`
    ///
    /// Settings are checked before any network activity. The first failing
    /// step ends the run; the upload is the only side effect, so nothing
    /// needs undoing on failure.
    #[instrument(skip(self), fields(bucket = %self.settings.raw_bucket))]
    pub async fn ingest_at(&self, now: DateTime<Utc>) -> Result<IngestReceipt, IngestError> {
        let result = self.run(now).await;
        if let Err(ref e) = result {
            warn!(kind = e.kind(), error = %e, "Ingestion failed");
        }
        result
    }

    async fn run(&self, now: DateTime<Utc>) -> Result<IngestReceipt, IngestError> {
        self.settings.validate()?;
        let key = StorageKey::for_instant(now);
        debug!(folder = key.date_path(), file = key.file_name(), "Configuration checked");

        let payload = self.source.fetch(&self.settings.source_url).await?;
        debug!(bytes = payload.len(), "Fetched upstream payload");

        let table = HourlyTable::from_json(&payload)?;
        let csv = Bytes::from(table.to_csv()?);
        debug!(
            rows = table.row_count(),
            columns = table.header().len(),
            "Transformed payload"
        );

        let size = csv.len();
        self.store
            .put_object(
                &self.settings.raw_bucket,
                key.as_str(),
                csv,
                StorageKey::CONTENT_TYPE,
            )
            .await?;

        let receipt = IngestReceipt {
            bucket: self.settings.raw_bucket.clone(),
            key,
            rows: table.row_count(),
            bytes: size,
        };
        info!(location = %receipt.location(), rows = receipt.rows, "Ingestion complete");

        Ok(receipt)
    }
}
