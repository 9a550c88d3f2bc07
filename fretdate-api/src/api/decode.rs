//! Decode endpoints
//!
//! A decode failure is an expected outcome and comes back as HTTP 200 with
//! `success: false`. Only malformed requests (unknown brand id, oversized
//! batch) are HTTP errors.

use axum::{extract::State, Json};
use fretdate_common::models::UnknownBrand;
use fretdate_common::{decode, detect_brand, Brand, BrandDetection, GuitarInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// One serial to decode; without a brand the detector picks one
#[derive(Debug, Clone, Deserialize)]
pub struct DecodeRequest {
    pub serial: String,
    #[serde(default)]
    pub brand: Option<String>,
}

/// Decode outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResponse {
    pub success: bool,
    /// Brand used for decoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GuitarInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present when the brand was not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<BrandDetection>,
}

impl DecodeResponse {
    fn decoded(brand: Brand, serial: &str, detection: Option<BrandDetection>) -> Self {
        let (result, error) = match decode(brand, serial) {
            Ok(info) => (Some(info), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            success: result.is_some(),
            brand: Some(brand),
            result,
            error,
            detection,
        }
    }

    fn failure(error: impl Into<String>, detection: Option<BrandDetection>) -> Self {
        Self {
            success: false,
            brand: None,
            result: None,
            error: Some(error.into()),
            detection,
        }
    }
}

/// Batch request body
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<DecodeRequest>,
}

/// Batch response body, in input order
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<DecodeResponse>,
}

/// Resolve the brand (given or detected) and decode.
///
/// A blank brand counts as absent.
pub fn decode_request(request: &DecodeRequest) -> Result<DecodeResponse, UnknownBrand> {
    let requested = request.brand.as_deref().map(str::trim).filter(|b| !b.is_empty());

    let response = match requested {
        Some(id) => DecodeResponse::decoded(id.parse()?, &request.serial, None),
        None => {
            let detection = detect_brand(&request.serial);
            match detection.brand() {
                Some(brand) => DecodeResponse::decoded(brand, &request.serial, Some(detection)),
                None => {
                    let message = detection.message.clone().unwrap_or_default();
                    DecodeResponse::failure(message, Some(detection))
                }
            }
        }
    };

    debug!(
        serial = %request.serial,
        brand = response.brand.map(|b| b.id()).unwrap_or("none"),
        success = response.success,
        "decode request"
    );
    Ok(response)
}

/// POST /api/decode
pub async fn decode_serial(Json(request): Json<DecodeRequest>) -> ApiResult<Json<DecodeResponse>> {
    Ok(Json(decode_request(&request)?))
}

/// POST /api/decode/batch
///
/// Items are independent: an unknown brand id fails only its own item.
pub async fn decode_batch(
    State(state): State<AppState>,
    Json(batch): Json<BatchRequest>,
) -> ApiResult<Json<BatchResponse>> {
    let max = state.config.max_batch;
    if batch.items.len() > max {
        return Err(ApiError::BatchTooLarge {
            size: batch.items.len(),
            max,
        });
    }

    let results = batch
        .items
        .iter()
        .map(|item| decode_request(item).unwrap_or_else(|e| DecodeResponse::failure(e.to_string(), None)))
        .collect();

    Ok(Json(BatchResponse { results }))
}
