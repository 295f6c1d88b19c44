//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Track API",
        version = "0.1.0",
        description = "Submit and evaluate asset ledger contract functions: manufacture, transfer, update, delete and enumeration of tracked assets.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::transactions::submit_transaction,
        crate::routes::transactions::list_functions,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::transactions::TransactionRequest,
        crate::routes::transactions::TransactionResponse,
        crate::routes::transactions::FunctionSummary,
    )),
    tags(
        (name = "transactions", description = "Asset ledger contract invocation"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
