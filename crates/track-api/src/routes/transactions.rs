//! # Transaction API
//!
//! Routes:
//! - POST /v1/transactions — run a contract function against the world state
//! - GET  /v1/transactions/functions — list functions and whether they commit
//!
//! Submit functions commit on success; evaluate functions never do. The
//! caller's credential travels in the `x-client-id` header, base64-encoded.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use track_contract::{function_catalog, run_transaction, Function, FunctionKind};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, ClientCredential, Validate};
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// A contract invocation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Function name, e.g. "ManufactureAsset".
    pub function: String,
    /// Function arguments; omitted for `InitLedger` and `GetAllAssets`.
    #[serde(default)]
    pub args: serde_json::Value,
}

impl Validate for TransactionRequest {
    fn validate(&self) -> Result<(), String> {
        if self.function.trim().is_empty() {
            return Err("function must not be empty".to_string());
        }
        Ok(())
    }
}

/// Result of a successful invocation.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// Canonical function name (aliases resolved).
    pub function: String,
    #[schema(value_type = String, example = "submit")]
    pub mode: FunctionKind,
    /// Function result; `null` for functions that return nothing.
    pub result: serde_json::Value,
}

/// Catalog entry for one contract function.
#[derive(Debug, Serialize, ToSchema)]
pub struct FunctionSummary {
    pub name: String,
    #[schema(value_type = String, example = "evaluate")]
    pub mode: FunctionKind,
}

/// Build the transactions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/transactions", post(submit_transaction))
        .route("/v1/transactions/functions", get(list_functions))
}

/// POST /v1/transactions — Run a contract function.
#[utoipa::path(
    post,
    path = "/v1/transactions",
    request_body = TransactionRequest,
    params(
        ("x-client-id" = Option<String>, Header, description = "Base64-encoded client id"),
    ),
    responses(
        (status = 200, description = "Function succeeded", body = TransactionResponse),
        (status = 400, description = "Unknown function or malformed arguments", body = crate::error::ErrorBody),
        (status = 401, description = "Caller identity unavailable", body = crate::error::ErrorBody),
        (status = 403, description = "Caller does not own the asset", body = crate::error::ErrorBody),
        (status = 404, description = "Asset not found", body = crate::error::ErrorBody),
        (status = 409, description = "Asset exists or commit conflict", body = crate::error::ErrorBody),
        (status = 422, description = "Request rejected by a contract rule", body = crate::error::ErrorBody),
    ),
    tag = "transactions"
)]
pub async fn submit_transaction(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
    ClientCredential(identity): ClientCredential,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let function: Function = req.function.parse()?;

    let invocation = run_transaction(&state.world, function, req.args, &identity)?;
    if invocation.committed.is_some() {
        metrics.record_commit();
    }

    Ok(Json(TransactionResponse {
        function: function.name().to_string(),
        mode: function.kind(),
        result: invocation.result,
    }))
}

/// GET /v1/transactions/functions — List contract functions.
#[utoipa::path(
    get,
    path = "/v1/transactions/functions",
    responses(
        (status = 200, description = "Function catalog", body = [FunctionSummary]),
    ),
    tag = "transactions"
)]
pub async fn list_functions() -> Json<Vec<FunctionSummary>> {
    let catalog = function_catalog()
        .into_iter()
        .map(|info| FunctionSummary {
            name: info.name.to_string(),
            mode: info.kind,
        })
        .collect();
    Json(catalog)
}
