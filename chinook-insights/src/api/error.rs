//! API error responses
//!
//! One service-wide error enum mapped onto HTTP status codes, with JSON
//! `{"error": ...}` bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by analysis handlers
#[derive(Debug)]
pub enum ApiError {
    /// Invalid request parameter
    BadRequest(String),
    /// Error propagated from the store or the domain layer
    Store(chinook_common::Error),
}

impl From<chinook_common::Error> for ApiError {
    fn from(err: chinook_common::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Store(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use chinook_common::Error;

        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Store(err) => match err {
                Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
                // The snapshot is malformed, not the request; the caller
                // decides whether to repair the store or skip the analysis
                Error::ReferentialIntegrity(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Referential integrity violation: {}", msg),
                ),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            },
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
