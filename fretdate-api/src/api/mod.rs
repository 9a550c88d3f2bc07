//! HTTP API handlers for fretdate-api

pub mod brands;
pub mod buildinfo;
pub mod decode;
pub mod detect;
pub mod health;

pub use brands::list_brands;
pub use buildinfo::get_build_info;
pub use decode::{decode_batch, decode_serial};
pub use detect::detect_serial;
pub use health::health_routes;
