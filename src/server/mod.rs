//! # HTTP Server for Template Calibration and Printing
//!
//! Serves the field catalog and the active template record, and renders
//! print documents for settlements.
//!
//! ## Usage
//!
//! ```bash
//! overprint serve --listen 0.0.0.0:8080 --store ./template.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/catalog` | Placeable fields |
//! | GET | `/api/fonts` | Font family presets |
//! | GET / PUT / DELETE | `/api/template` | Active template record |
//! | POST | `/api/template/background` | Decode an uploaded form image |
//! | GET | `/api/template/preview` | Template filled with sample values |
//! | POST | `/api/print` | Print document for a settlement |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::OverprintError;

/// Largest accepted body on routes that carry the form scan.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/catalog", get(handlers::catalog::list))
        .route("/api/fonts", get(handlers::catalog::fonts))
        .route(
            "/api/template",
            get(handlers::template::get)
                .put(handlers::template::put)
                .delete(handlers::template::delete)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/template/background",
            post(handlers::template::upload_background)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/template/preview", get(handlers::template::preview))
        .route("/api/print", post(handlers::print::print))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use overprint::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), overprint::error::OverprintError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     store_path: Some("template.json".into()),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), OverprintError> {
    let app = router(Arc::new(AppState::new(config.clone())));

    tracing::info!(
        listen = %config.listen_addr,
        page = config.page.name,
        store = %config
            .store_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "memory".to_string()),
        "overprint server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            OverprintError::Config(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app).await?;

    Ok(())
}
