//! Error types for fretdate-api
//!
//! Only request problems are errors here. A serial that fails to decode is a
//! normal result and is reported in the response body with HTTP 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fretdate_common::models::UnknownBrand;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Brand id not in the catalogue (400)
    #[error(transparent)]
    UnknownBrand(#[from] UnknownBrand),

    /// Batch above the configured limit (400)
    #[error("Batch of {size} items exceeds the limit of {max}")]
    BatchTooLarge { size: usize, max: usize },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_code = match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::UnknownBrand(_) => "UNKNOWN_BRAND",
            ApiError::BatchTooLarge { .. } => "BATCH_TOO_LARGE",
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
