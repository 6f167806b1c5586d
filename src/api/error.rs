//! API error types with JSON envelope responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::types::AnalyzeResponse;

/// Errors that surface as non-200 responses. Expected failures (validation,
/// analysis unavailable) stay inside the 200 envelope instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                // Internal detail stays in the logs, never in the response
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(AnalyzeResponse::failed(&message))).into_response()
    }
}
