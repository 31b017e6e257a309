//! Application state shared across handlers

use std::sync::Arc;

use application::IngestService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ingest service run on every trigger
    pub ingest_service: Arc<IngestService>,
}

impl AppState {
    /// Create state around an ingest service
    pub const fn new(ingest_service: Arc<IngestService>) -> Self {
        Self { ingest_service }
    }
}
