use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::{internal_error, load_failure_message};
use crate::web::AppState;

/// `GET /api/xmltv`
pub async fn serve_guide(State(state): State<AppState>) -> Response {
    let url = match state.config.require_upstream_url() {
        Ok(url) => url,
        Err(e) => return internal_error(e.to_string()),
    };

    let channels = match state.catalog.load_channels(url).await {
        Ok(channels) => channels,
        Err(e) => return internal_error(load_failure_message(&e)),
    };

    match state.epg.generate(&channels) {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => internal_error(format!("Error generating XMLTV data: {e}")),
    }
}
