//! Brand catalogue endpoint

use axum::Json;
use fretdate_common::Brand;
use serde::Serialize;

/// One selectable brand
#[derive(Debug, Serialize)]
pub struct BrandEntry {
    pub id: &'static str,
    pub name: &'static str,
    /// Covered by automatic detection
    pub detectable: bool,
}

/// GET /api/brands
pub async fn list_brands() -> Json<Vec<BrandEntry>> {
    Json(
        Brand::ALL
            .iter()
            .map(|brand| BrandEntry {
                id: brand.id(),
                name: brand.name(),
                detectable: brand.is_detectable(),
            })
            .collect(),
    )
}
