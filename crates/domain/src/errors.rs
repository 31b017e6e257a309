//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Payload is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Payload is valid JSON but has an unexpected shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Writing the tabular output failed
    #[error("CSV write failed: {0}")]
    CsvWrite(String),
}

impl DomainError {
    /// Create an invalid payload error
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload(reason.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        Self::CsvWrite(err.to_string())
    }
}
