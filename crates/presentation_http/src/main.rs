//! Open-Meteo ingest HTTP server
//!
//! Main entry point: each request to `/` runs one ingestion.

use std::{sync::Arc, time::Duration};

use application::{IngestService, ports::BlobStorePort, ports::SourcePort};
use infrastructure::{AppConfig, OpenMeteoSourceAdapter, S3BlobStoreAdapter, init_logging};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format can be honored
    let (config, load_error) = AppConfig::load_with_fallback();

    init_logging(config.server.log_format)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults for optional settings: {}", e);
    }

    info!("openmeteo-ingest v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = config.ingest_settings();
    let missing = settings.missing();
    if missing.is_empty() {
        info!(
            bucket = %settings.raw_bucket,
            source_url = %settings.source_url,
            storage_endpoint = %config.storage.endpoint,
            "Configuration loaded"
        );
    } else {
        warn!(
            missing = ?missing,
            "Required settings missing, every trigger will fail until they are set"
        );
    }

    let source: Arc<dyn SourcePort> = Arc::new(
        OpenMeteoSourceAdapter::with_config(config.source.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize source client: {e}"))?,
    );
    let store: Arc<dyn BlobStorePort> = Arc::new(S3BlobStoreAdapter::new(config.storage.clone()));

    let state = AppState::new(Arc::new(IngestService::new(source, store, settings)));

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for in-flight ingestions to finish...", timeout);
}
