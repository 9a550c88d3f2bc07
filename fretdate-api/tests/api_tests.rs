//! Integration tests for fretdate-api endpoints
//!
//! Tests cover:
//! - Health and build info
//! - Brand catalogue
//! - Single decode with explicit brand, detected brand and ambiguous detection
//! - Batch decode ordering, item independence and the batch limit
//! - Brand detection

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fretdate_api::config::ServiceConfig;
use fretdate_api::{build_router, AppState};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: Create app with default configuration
fn setup_app() -> axum::Router {
    build_router(AppState::new(ServiceConfig::default()))
}

/// Test helper: Create app with a custom batch limit
fn setup_app_with_batch_limit(max_batch: usize) -> axum::Router {
    let config = ServiceConfig {
        max_batch,
        ..ServiceConfig::default()
    };
    build_router(AppState::new(config))
}

/// Test helper: Create request without body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Create JSON POST request
fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health and Build Info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = setup_app().oneshot(test_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fretdate-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app_with_batch_limit(7);
    let response = app.oneshot(test_request("GET", "/api/buildinfo")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
    assert_eq!(body["max_batch"], 7);
}

// =============================================================================
// Brand Catalogue
// =============================================================================

#[tokio::test]
async fn test_brands_lists_all_with_detectable_flag() {
    let response = setup_app().oneshot(test_request("GET", "/api/brands")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let brands = body.as_array().expect("brands should be an array");
    assert_eq!(brands.len(), 25);

    let detectable: Vec<&str> = brands
        .iter()
        .filter(|b| b["detectable"] == true)
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(detectable, vec!["fender", "gibson", "epiphone", "martin", "ibanez"]);

    let music_man = brands.iter().find(|b| b["id"] == "music-man").unwrap();
    assert_eq!(music_man["name"], "Music Man");
}

// =============================================================================
// Single Decode
// =============================================================================

#[tokio::test]
async fn test_decode_with_brand() {
    let request = json_request("/api/decode", json!({"serial": "70328123", "brand": "gibson"}));
    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["brand"], "gibson");
    assert_eq!(body["result"]["serialNumber"], "70328123");
    assert_eq!(body["result"]["year"], "1978");
    assert!(body.get("detection").is_none());
}

#[tokio::test]
async fn test_decode_accepts_display_name() {
    let request = json_request("/api/decode", json!({"serial": "SI02060234", "brand": "Washburn"}));
    let body = extract_json(setup_app().oneshot(request).await.unwrap().into_body()).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["month"], "February");
    assert_eq!(body["result"]["country"], "Indonesia");
}

#[tokio::test]
async fn test_decode_without_brand_uses_detection() {
    let request = json_request("/api/decode", json!({"serial": "455000"}));
    let body = extract_json(setup_app().oneshot(request).await.unwrap().into_body()).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["brand"], "martin");
    assert_eq!(body["result"]["year"], "1985");
    assert_eq!(body["detection"]["candidates"], json!(["martin"]));
}

#[tokio::test]
async fn test_decode_ambiguous_detection_returns_candidates() {
    let request = json_request("/api/decode", json!({"serial": "E512345"}));
    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert!(body.get("result").is_none());
    assert_eq!(body["detection"]["candidates"], json!(["fender", "ibanez"]));
    assert!(body["error"].as_str().unwrap().contains("select the brand manually"));
}

#[tokio::test]
async fn test_decode_failure_is_ok_status() {
    let request = json_request("/api/decode", json!({"serial": "05131234", "brand": "schecter"}));
    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid month '13'. Expected 01-12.");
}

#[tokio::test]
async fn test_decode_unknown_brand_is_bad_request() {
    let request = json_request("/api/decode", json!({"serial": "12345", "brand": "harmony"}));
    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "UNKNOWN_BRAND");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("harmony"));
    assert!(message.contains("music-man"));
}

#[tokio::test]
async fn test_decode_empty_serial() {
    let request = json_request("/api/decode", json!({"serial": "  ", "brand": "martin"}));
    let body = extract_json(setup_app().oneshot(request).await.unwrap().into_body()).await;

    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Please enter a serial number."));
    assert!(error.contains("Recognized Martin formats"));
}

// =============================================================================
// Batch Decode
// =============================================================================

#[tokio::test]
async fn test_batch_preserves_order_and_independence() {
    let request = json_request(
        "/api/decode/batch",
        json!({"items": [
            {"serial": "455000", "brand": "martin"},
            {"serial": "12345", "brand": "harmony"},
            {"serial": "05131234", "brand": "schecter"},
            {"serial": "N912345"}
        ]}),
    );
    let response = setup_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);

    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["result"]["year"], "1985");

    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].as_str().unwrap().contains("Unknown brand"));

    assert_eq!(results[2]["success"], false);
    assert!(results[2]["error"].as_str().unwrap().contains("Expected 01-12"));

    assert_eq!(results[3]["brand"], "fender");
}

#[tokio::test]
async fn test_batch_above_limit_is_rejected() {
    let items: Vec<Value> = (0..3).map(|_| json!({"serial": "455000", "brand": "martin"})).collect();
    let request = json_request("/api/decode/batch", json!({ "items": items }));
    let response = setup_app_with_batch_limit(2).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BATCH_TOO_LARGE");
}

#[tokio::test]
async fn test_batch_at_limit_is_accepted() {
    let items: Vec<Value> = (0..2).map(|_| json!({"serial": "455000", "brand": "martin"})).collect();
    let request = json_request("/api/decode/batch", json!({ "items": items }));
    let response = setup_app_with_batch_limit(2).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Detection
// =============================================================================

#[tokio::test]
async fn test_detect_single_candidate() {
    let response = setup_app()
        .oneshot(test_request("GET", "/api/detect?serial=I99021234"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["candidates"], json!(["epiphone"]));
    assert_eq!(body["confident"], true);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_detect_no_candidates() {
    let response = setup_app()
        .oneshot(test_request("GET", "/api/detect?serial=HELLO"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["candidates"], json!([]));
    assert_eq!(body["confident"], false);
    assert!(body["message"].as_str().unwrap().contains("manually"));
}

#[tokio::test]
async fn test_detect_requires_serial() {
    let response = setup_app().oneshot(test_request("GET", "/api/detect")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
