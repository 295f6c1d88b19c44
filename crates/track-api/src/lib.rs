//! # track-api — HTTP Host for the Asset Ledger Contract
//!
//! Exposes the contract's functions over HTTP. Each request runs as one
//! transaction against the shared in-memory world state: submit functions
//! commit on success, evaluate functions never do.
//!
//! ## API Surface
//!
//! | Route                              | Module                   |
//! |------------------------------------|--------------------------|
//! | `POST /v1/transactions`            | [`routes::transactions`] |
//! | `GET /v1/transactions/functions`   | [`routes::transactions`] |
//! | `GET /openapi.json`                | [`openapi`]              |
//! | `GET /health/{liveness,readiness}` | this module              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Like [`app`], recording into the given `metrics`.
///
/// Health probes are mounted outside the metrics middleware so probe
/// traffic does not skew the counters.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::transactions::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — the world state is in-process, so always ready.
async fn readiness() -> &'static str {
    "ready"
}
