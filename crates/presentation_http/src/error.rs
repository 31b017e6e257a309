//! API error handling
//!
//! Maps ingestion failures to plain-text 500 responses.

use application::IngestError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a triggered ingestion, rendered as a plain-text response
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] IngestError);

impl ApiError {
    /// Underlying ingestion failure
    #[must_use]
    pub const fn inner(&self) -> &IngestError {
        &self.0
    }

    /// Status code of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Response body
    ///
    /// Missing settings read `Missing env vars: <names>`, everything else
    /// `ERROR: <kind>: <message>`.
    #[must_use]
    pub fn body(&self) -> String {
        match &self.0 {
            IngestError::Configuration { .. } => self.0.to_string(),
            other => format!("ERROR: {}: {other}", other.kind()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}
