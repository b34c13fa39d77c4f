//! # Error Types
//!
//! This module defines error types used throughout the overprint library.
//!
//! Placement conflicts and resolver gaps are not errors: the editor reports
//! them as [`PlaceOutcome`](crate::editor::PlaceOutcome) values and the
//! resolver turns them into empty strings.

use thiserror::Error;

/// Main error type for overprint operations
#[derive(Debug, Error)]
pub enum OverprintError {
    /// No template saved yet, or the saved template has no fields
    #[error("No template configured. Set up the invoice template in the template editor first.")]
    NoTemplate,

    /// Persistence layer failure (unreadable record, failed write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Background image could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid configuration or operator input
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
