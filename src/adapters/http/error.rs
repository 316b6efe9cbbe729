//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::payment::PaymentError;

use super::dto::ErrorResponse;

/// HTTP-facing error.
///
/// Upstream and storage details are logged, never echoed to the caller.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal,
}

impl ApiError {
    /// Map any lifecycle error to 500, as the webhook contract requires.
    pub fn webhook(error: PaymentError) -> Self {
        tracing::error!(%error, "webhook processing failed");
        ApiError::Internal
    }
}

impl From<PaymentError> for ApiError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::Validation(message) => ApiError::BadRequest(message),
            PaymentError::NotFound(_) => ApiError::NotFound,
            PaymentError::Upstream(_) | PaymentError::Storage(_) => {
                tracing::error!(%error, "request failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_FAILED", message),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", "payment not found"),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "internal error"),
            ),
        };
        (status, Json(body)).into_response()
    }
}
