//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps dispatch and contract errors to HTTP status codes and returns a JSON
//! body carrying a machine-readable code. Ledger-side failures (undecodable
//! records, store faults) are logged and never echoed to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use track_contract::DispatchError;
use track_core::{ContractError, ErrorKind, StoreError};
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "NOT_FOUND", "ALREADY_EXISTS").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The asset the error refers to, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown function or malformed arguments (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A contract rule rejected the request. Only client-caused kinds.
    #[error("{message}")]
    Contract {
        kind: ErrorKind,
        message: String,
        asset_id: Option<String>,
    },

    /// The transaction lost an optimistic commit race (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Contract { kind, .. } => (status_for(*kind), kind.as_str()),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidRequest | ErrorKind::InvalidData => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::IdentityUnavailable => StatusCode::UNAUTHORIZED,
        ErrorKind::DecodeError | ErrorKind::EncodeError | ErrorKind::StoreError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };
        let details = match &self {
            Self::Contract {
                asset_id: Some(id),
                ..
            } => Some(serde_json::json!({ "assetId": id })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        match &err {
            ContractError::Store(StoreError::Conflict { .. }) => Self::Conflict(err.to_string()),
            _ if err.kind().is_client_error() => Self::Contract {
                kind: err.kind(),
                message: err.to_string(),
                asset_id: err.asset_id().map(str::to_string),
            },
            _ => Self::Internal(err.to_string()),
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownFunction(_) | DispatchError::InvalidArguments { .. } => {
                Self::BadRequest(err.to_string())
            }
            DispatchError::Contract(err) => err.into(),
            DispatchError::Response { .. } => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use track_core::IdentityError;

    fn status_of(err: impl Into<AppError>) -> (StatusCode, &'static str) {
        err.into().status_and_code()
    }

    #[test]
    fn contract_kinds_map_to_statuses() {
        assert_eq!(
            status_of(ContractError::NotFound { id: "a".into() }),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            status_of(ContractError::AlreadyExists { id: "a".into() }),
            (StatusCode::CONFLICT, "ALREADY_EXISTS")
        );
        assert_eq!(
            status_of(ContractError::Unauthorized {
                id: "a".into(),
                caller: "bob".into()
            }),
            (StatusCode::FORBIDDEN, "UNAUTHORIZED")
        );
        assert_eq!(
            status_of(ContractError::InvalidRequest {
                id: "a".into(),
                reason: "empty".into()
            }),
            (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST")
        );
        assert_eq!(
            status_of(ContractError::from(IdentityError::Empty)),
            (StatusCode::UNAUTHORIZED, "IDENTITY_UNAVAILABLE")
        );
    }

    #[test]
    fn store_failures_are_internal_except_conflicts() {
        let conflict = StoreError::Conflict {
            key: "a".into(),
            read: 1,
            current: 2,
        };
        assert_eq!(
            status_of(ContractError::from(conflict)),
            (StatusCode::CONFLICT, "CONFLICT")
        );
        let write = StoreError::Write {
            key: "a".into(),
            reason: "disk full".into(),
        };
        assert_eq!(
            status_of(ContractError::from(write)),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        );
    }

    #[test]
    fn encode_failures_are_internal() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ContractError::Encode {
            id: "a".into(),
            source,
        };
        assert_eq!(
            status_of(err),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        );
    }

    #[test]
    fn dispatch_rejections_are_bad_requests() {
        assert_eq!(
            status_of(DispatchError::UnknownFunction("Nope".into())),
            (StatusCode::BAD_REQUEST, "BAD_REQUEST")
        );
    }

    #[tokio::test]
    async fn internal_message_is_not_leaked() {
        let response = AppError::Internal("store poisoned at key x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn contract_errors_carry_asset_id() {
        let response = AppError::from(ContractError::NotFound { id: "a9".into() }).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "NOT_FOUND");
        assert_eq!(body.error.details.unwrap()["assetId"], "a9");
    }
}
