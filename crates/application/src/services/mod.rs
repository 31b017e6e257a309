//! Application services - Use case implementations

mod ingest_service;

pub use ingest_service::{
    IngestReceipt, IngestService, IngestSettings, RAW_BUCKET_VAR, SOURCE_URL_VAR,
};
