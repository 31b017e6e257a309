//! Application layer - Use cases and orchestration
//!
//! Contains the ingestion use case, its failure kinds, and the port
//! definitions implemented by infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::IngestError;
pub use ports::*;
pub use services::*;
