//! HTTP error translation
//!
//! Maps [`VeilError`] onto a status code and a JSON [`ErrorResponse`] body.
//! Variants that never stem from a request (configuration, I/O,
//! serialization, internal) are logged in full and returned as an opaque
//! internal error so no server-side detail leaks to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::errors::VeilError;
use crate::domain::response::ErrorResponse;

impl IntoResponse for VeilError {
    fn into_response(self) -> Response {
        let status = match self {
            VeilError::Validation(_) => StatusCode::BAD_REQUEST,
            VeilError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let (kind, message) = match &self {
            VeilError::Validation(_)
            | VeilError::ServiceUnavailable(_)
            | VeilError::Analysis(_)
            | VeilError::Redaction(_) => (self.kind(), self.to_string()),
            other => {
                tracing::error!(kind = other.kind(), error = %other, "Unhandled error");
                (
                    VeilError::Internal(String::new()).kind(),
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                kind: kind.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
