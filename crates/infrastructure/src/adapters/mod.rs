//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod s3_blob_store_adapter;
mod source_adapter;

pub use s3_blob_store_adapter::S3BlobStoreAdapter;
pub use source_adapter::OpenMeteoSourceAdapter;
