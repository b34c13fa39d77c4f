//! HTTP handlers for the server.

pub mod catalog;
pub mod print;
pub mod template;

use axum::http::StatusCode;

use crate::error::OverprintError;

/// Map a library error onto a status code and operator-facing message.
pub(crate) fn error_response(err: OverprintError) -> (StatusCode, String) {
    let status = match &err {
        OverprintError::NoTemplate => StatusCode::CONFLICT,
        OverprintError::Config(_) | OverprintError::Image(_) | OverprintError::Json(_) => {
            StatusCode::BAD_REQUEST
        }
        OverprintError::Storage(_) | OverprintError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (status, err.to_string())
}
