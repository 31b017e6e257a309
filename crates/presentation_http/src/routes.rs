//! Route definitions

use axum::{
    Router,
    routing::{any, get},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Ingestion trigger, any method
        .route("/", any(handlers::ingest::ingest))
        .route("/ingest", any(handlers::ingest::ingest))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Attach state
        .with_state(state)
}
