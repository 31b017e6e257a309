//! Ingestion trigger handler

use axum::{extract::State, http::Method, http::StatusCode};
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Run one ingestion
///
/// Accepts any method and ignores the request body; all parameters come
/// from configuration.
pub async fn ingest(
    State(state): State<AppState>,
    method: Method,
) -> Result<(StatusCode, String), ApiError> {
    info!(%method, "Ingestion triggered");

    let receipt = state.ingest_service.ingest().await?;
    Ok((StatusCode::OK, format!("OK {}", receipt.location())))
}
