//! fretdate-api library - HTTP/JSON front end over the decoding core
//!
//! Accepts `{serial, brand?}` and returns decoded metadata, a decode failure
//! message or a brand detection result. No decoding logic lives here.

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod report;

use config::ServiceConfig;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved service configuration
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let routes = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/brands", get(api::list_brands))
        .route("/api/decode", post(api::decode_serial))
        .route("/api/decode/batch", post(api::decode_batch))
        .route("/api/detect", get(api::detect_serial));

    Router::new()
        .merge(routes)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
