//! HTTP presentation layer for the Open-Meteo ingest
//!
//! Exposes the ingestion trigger and health endpoints.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
