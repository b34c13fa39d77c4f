//! Field catalog handlers.

use axum::Json;
use serde::Serialize;

use crate::catalog::{self, FONT_FAMILIES, FieldDescriptor};

/// A selectable font family.
#[derive(Debug, Serialize)]
pub struct FontPreset {
    pub name: &'static str,
    pub family: &'static str,
}

/// GET /api/catalog - List every placeable field.
pub async fn list() -> Json<&'static [FieldDescriptor]> {
    Json(catalog::catalog())
}

/// GET /api/fonts - List font family presets.
pub async fn fonts() -> Json<Vec<FontPreset>> {
    Json(
        FONT_FAMILIES
            .iter()
            .map(|&(name, family)| FontPreset { name, family })
            .collect(),
    )
}
