//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Failure kinds of one ingestion run
///
/// Every step of the run produces exactly one of these; none is retried.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Required settings are missing; nothing was attempted
    #[error("Missing env vars: {}", missing.join(", "))]
    Configuration {
        /// Names of the missing settings
        missing: Vec<&'static str>,
    },

    /// Upstream request failed or returned a non-success status
    #[error("{0}")]
    Fetch(String),

    /// Upstream body could not be turned into a table
    #[error("{0}")]
    Parse(String),

    /// Writing the object to blob storage failed
    #[error("{0}")]
    Storage(String),
}

impl IngestError {
    /// Stable name of the failure kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "ConfigurationError",
            Self::Fetch(_) => "FetchError",
            Self::Parse(_) => "ParseError",
            Self::Storage(_) => "StorageError",
        }
    }

    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<DomainError> for IngestError {
    fn from(err: DomainError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_lists_missing_names() {
        let err = IngestError::Configuration {
            missing: vec!["RAW_BUCKET", "SOURCE_URL"],
        };
        assert_eq!(err.to_string(), "Missing env vars: RAW_BUCKET, SOURCE_URL");
        assert_eq!(err.kind(), "ConfigurationError");
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(IngestError::fetch("x").kind(), "FetchError");
        assert_eq!(IngestError::Parse("x".to_string()).kind(), "ParseError");
        assert_eq!(IngestError::storage("x").kind(), "StorageError");
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = IngestError::fetch("HTTP 503 Service Unavailable");
        assert_eq!(err.to_string(), "HTTP 503 Service Unavailable");
    }

    #[test]
    fn domain_error_converts_to_parse() {
        let source = DomainError::InvalidJson("expected value at line 1 column 1".to_string());
        let result: IngestError = source.into();
        assert!(matches!(result, IngestError::Parse(_)));
        assert!(result.to_string().contains("expected value"));
    }
}
