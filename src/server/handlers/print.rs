//! Print rendering handler.

use axum::{Json, extract::State, http::StatusCode, response::Html};
use serde::Deserialize;
use std::sync::Arc;

use crate::render::html;
use crate::resolve::{DailyCollectionEntry, SettlementRecord};

use super::super::state::AppState;
use super::error_response;

/// Request body for the print endpoint.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub settlement: SettlementRecord,
    #[serde(default)]
    pub collections: Vec<DailyCollectionEntry>,
}

/// POST /api/print - Render a settlement onto the stored template.
///
/// Responds with the print document, or 409 when no template is configured.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PrintRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let config = state
        .store
        .load()
        .map_err(error_response)?
        .unwrap_or_default();

    let surface = state
        .renderer
        .render(&config, &req.settlement, &req.collections)
        .map_err(error_response)?;

    tracing::info!(
        book = req.settlement.book_number.as_deref().unwrap_or(""),
        fields = surface.items.len(),
        "print document rendered"
    );
    Ok(Html(html::to_html(&surface)))
}
