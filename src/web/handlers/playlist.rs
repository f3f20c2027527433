use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::internal_error;
use crate::web::AppState;

/// Body returned for any playlist failure
pub const PLAYLIST_FAILURE_BODY: &str = "Error";

/// `GET /api/m3u`
pub async fn serve_playlist(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    debug!("Playlist requested, user agent: {}", user_agent);

    // Without a URL the fetch itself fails unless the check is enabled
    let url = match state.config.require_upstream_url() {
        Ok(url) => url,
        Err(e) if state.config.playlist.require_upstream_url => return internal_error(e.to_string()),
        Err(_) => "",
    };

    match state.catalog.load_channels(url).await {
        Ok(channels) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            state.m3u.generate(&channels),
        )
            .into_response(),
        Err(_) => (StatusCode::OK, PLAYLIST_FAILURE_BODY).into_response(),
    }
}
