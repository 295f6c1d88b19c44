//! # Custom Extractors & Validation
//!
//! JSON body extraction mapped onto [`AppError`], the [`Validate`] trait for
//! request DTOs, and the [`ClientCredential`] extractor that captures the
//! caller's transport-encoded id from the `x-client-id` header.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::Json;
use track_contract::StaticIdentity;

use crate::error::AppError;

/// Header carrying the base64-encoded client id.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Business-rule validation beyond what serde checks.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::BadRequest)?;
    Ok(value)
}

/// The credential presented with the request.
///
/// Never rejects: a missing header yields an anonymous identity, and the
/// contract reports `IDENTITY_UNAVAILABLE` only for functions that need one.
#[derive(Debug, Clone)]
pub struct ClientCredential(pub StaticIdentity);

impl<S> FromRequestParts<S> for ClientCredential
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.headers.get(CLIENT_ID_HEADER) {
            Some(value) => {
                StaticIdentity::encoded(String::from_utf8_lossy(value.as_bytes()).into_owned())
            }
            None => StaticIdentity::anonymous(),
        };
        Ok(Self(identity))
    }
}
