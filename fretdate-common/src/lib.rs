//! # Fretdate Common Library
//!
//! Decoding core for musical-instrument serial numbers:
//! - Serial normalization
//! - Per-brand format cascades and decoders (25 brands)
//! - Static lookup tables (factory codes, letter codes, serial range tables)
//! - Year/date inference helpers (two-digit years, Julian days, ISO weeks, era codes)
//! - Brand detection heuristic
//! - Result post-processing (corrective retry, future-year filter)
//!
//! Everything in this crate is pure: no I/O, no shared mutable state.

pub mod brands;
pub mod cascade;
pub mod dating;
pub mod decode;
pub mod detect;
pub mod error;
pub mod models;
pub mod range;
pub mod serial;
pub mod tables;

pub use decode::{decode, decode_at};
pub use detect::detect_brand;
pub use error::{DecodeError, DecodeResult};
pub use models::{Brand, BrandDetection, GuitarInfo};
pub use serial::normalize;
