//! Brand detection endpoint

use axum::{extract::Query, Json};
use fretdate_common::{detect_brand, BrandDetection};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// Query parameters for brand detection
#[derive(Debug, Deserialize)]
pub struct DetectQuery {
    pub serial: Option<String>,
}

/// GET /api/detect?serial=...
///
/// Classifies the serial's shape; never decodes.
pub async fn detect_serial(Query(query): Query<DetectQuery>) -> ApiResult<Json<BrandDetection>> {
    let serial = query
        .serial
        .ok_or_else(|| ApiError::BadRequest("missing 'serial' query parameter".to_string()))?;
    Ok(Json(detect_brand(&serial)))
}
