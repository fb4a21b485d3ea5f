// main.rs
mod commands;
mod config;
mod devices;
mod events;
mod docs;
mod error;
mod handlers;
mod metrics;
mod models;
mod router;
mod utils;

use models::AppState;
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_tracing();

    let settings = config::Settings::new()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    if settings.metrics.enabled {
        crate::metrics::setup_metrics(settings.metrics.port)?;
    }

    let state = Arc::new(AppState::new());

    let app = router::build_router(state)
        .layer(GlobalConcurrencyLimitLayer::new(settings.server.max_connections as usize));

    let listener = tokio::net::TcpListener::bind(&settings.server.address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind address: {}", e))?;

    tracing::info!("Server started on {}", settings.server.address);
    tracing::info!("Device control endpoint: POST /api");
    tracing::info!("Device states endpoint: GET /devices");
    tracing::info!("Health check endpoint: GET /health");
    tracing::info!("Web interface: GET /");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
