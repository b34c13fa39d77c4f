//! Template record handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
};
use serde::Serialize;
use std::sync::Arc;

use crate::render::Values;
use crate::template::{BackgroundImage, TemplateConfig};

use super::super::state::AppState;
use super::error_response;

/// Response from the background upload endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundUpload {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

/// GET /api/template - Fetch the stored template.
pub async fn get(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TemplateConfig>, (StatusCode, String)> {
    match state.store.load().map_err(error_response)? {
        Some(config) => Ok(Json(config)),
        None => Err((StatusCode::NOT_FOUND, "No template saved".to_string())),
    }
}

/// PUT /api/template - Replace the stored template.
pub async fn put(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TemplateConfig>,
) -> Result<Json<TemplateConfig>, (StatusCode, String)> {
    config.validate().map_err(error_response)?;
    state.store.save(&config).map_err(error_response)?;
    Ok(Json(config))
}

/// DELETE /api/template - Clear the stored template.
pub async fn delete(State(state): State<Arc<AppState>>) -> Result<StatusCode, (StatusCode, String)> {
    state.store.clear().map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/template/background - Decode an uploaded form image.
///
/// Returns the inline image and its intrinsic size for the editor's draft.
/// Nothing is saved until the draft is PUT back.
pub async fn upload_background(
    mut multipart: Multipart,
) -> Result<Json<BackgroundUpload>, (StatusCode, String)> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read image: {}", e)))?;
            image_data = Some(bytes.to_vec());
            break;
        }
    }

    let bytes = image_data.ok_or((StatusCode::BAD_REQUEST, "No image field found".to_string()))?;
    let (image, size) = BackgroundImage::from_bytes(&bytes).map_err(error_response)?;

    tracing::info!(width = size.width, height = size.height, "background uploaded");
    Ok(Json(BackgroundUpload {
        width: size.width,
        height: size.height,
        data_url: image.data_url().to_string(),
    }))
}

/// GET /api/template/preview - Stored template filled with sample values.
pub async fn preview(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let config = state
        .store
        .load()
        .map_err(error_response)?
        .unwrap_or_default();
    let surface = state
        .renderer
        .render_preview(&config, Values::Sample)
        .map_err(error_response)?;
    Ok(Html(crate::render::html::to_html(&surface)))
}
