//! HTTP request handlers organized by output
//!
//! The playlist endpoint is lenient and answers `Error` with status 200 on
//! any failure. The guide and stream-list endpoints answer 500 with a plain
//! text description.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::AppError;

pub mod guide;
pub mod health;
pub mod playlist;
pub mod streams;

/// Describe a failed catalog load for a strict endpoint
pub(crate) fn load_failure_message(err: &AppError) -> String {
    match err {
        AppError::Fetch(e) => format!("Error fetching media data from MEDIA_URL: {e}"),
        AppError::Decode(e) => format!("Error parsing channels JSON: {e}"),
        other => other.to_string(),
    }
}

/// Plain-text 500 response
pub(crate) fn internal_error(message: String) -> Response {
    error!("{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
