use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use boutika_core::checkout::CheckoutError;
use boutika_core::fx::FxError;

/// API-level error rendered as `{"error": message}` with the matching status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<FxError> for ApiError {
    fn from(err: FxError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            // The caller can fix these; connectivity to the order backend
            // is the one upstream failure.
            CheckoutError::Invalid(_)
            | CheckoutError::EmptyCart
            | CheckoutError::Rejected(_)
            | CheckoutError::AlreadyInProgress
            | CheckoutError::NotAwaitingConfirmation => ApiError::BadRequest(err.to_string()),
            CheckoutError::Network(_) => ApiError::BadGateway(err.to_string()),
        }
    }
}
