//! # track-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080) and seeds
//! the ledger at startup when `TRACK_SEED_LEDGER` is set.

use track_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    let state = AppState::with_config(config).map_err(|e| {
        tracing::error!("Startup failed: {e}");
        e
    })?;

    let app = track_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Asset Track API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
