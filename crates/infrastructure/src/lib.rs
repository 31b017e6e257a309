//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains configuration loading, logging setup, the upstream source
//! adapter, and the S3-compatible blob store adapter.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, ServerConfig, StorageConfig};
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
