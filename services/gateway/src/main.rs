mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod router;
mod sessions;
mod state;

use config::GatewayConfig;
use risk_engine::engine::RiskEngine;
use risk_engine::forest::ForestModel;
use router::create_router;
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Cardio Shield gateway");

    let config = GatewayConfig::default();

    // No degraded mode: without a classifier nothing is served
    let model = ForestModel::load(&config.model_path).map_err(|e| {
        tracing::error!(
            error = %e,
            path = %config.model_path.display(),
            "Classifier artifact unavailable, refusing to start"
        );
        e
    })?;

    let engine = RiskEngine::with_config(Arc::new(model), config.engine);
    let state = AppState::new(engine);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
