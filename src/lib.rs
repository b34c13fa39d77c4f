//! # Overprint - Invoice Template Calibration and Print Rendering
//!
//! Overprint positions the fields of a monthly settlement invoice over a
//! scanned pre-printed form, then prints only the field text onto the
//! physical form. It provides:
//!
//! - **Catalog**: the fixed set of placeable invoice fields
//! - **Calibration**: a placement editor with drag, nudge and style edits
//! - **Resolution**: settlement records turned into display strings
//! - **Rendering**: print, preview and editor surfaces, emitted as HTML
//! - **Server**: HTTP API around a single persisted template
//!
//! ## Quick Start
//!
//! ```no_run
//! use overprint::{
//!     render::{PrintRenderer, html},
//!     resolve::SettlementRecord,
//!     template::{JsonFileStore, TemplateStore},
//! };
//!
//! let store = JsonFileStore::new("template.json");
//! let config = store.load()?.unwrap_or_default();
//!
//! let settlement = SettlementRecord {
//!     book_number: Some("B-17".to_string()),
//!     net_amount: Some(15230.5),
//!     ..Default::default()
//! };
//!
//! let surface = PrintRenderer::default().render(&config, &settlement, &[])?;
//! std::fs::write("invoice.html", html::to_html(&surface))?;
//!
//! # Ok::<(), overprint::error::OverprintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Placeable fields and font presets |
//! | [`template`] | Template record and its store |
//! | [`editor`] | Interactive placement editing |
//! | [`resolve`] | Settlement values to display strings |
//! | [`render`] | Surface layout and HTML output |
//! | [`geometry`] | Percent coordinates and alignment anchoring |
//! | [`printer`] | Physical page profiles |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod catalog;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod printer;
pub mod render;
pub mod resolve;
pub mod server;
pub mod template;

// Re-exports for convenience
pub use error::OverprintError;
pub use printer::PageProfile;
pub use render::PrintRenderer;
pub use template::TemplateConfig;
