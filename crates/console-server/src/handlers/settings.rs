//! Runtime settings for the browser dashboard

use crate::state::AppState;
use axum::{Json, extract::State, http::header, response::IntoResponse};
use std::sync::Arc;
use tracing::debug;

/// Serve the backend and endpoint settings as `/config.json`
///
/// Sent with `Cache-Control: no-store`.
pub async fn console_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!(
        backends = state.config.console.backends.len(),
        endpoints = state.config.console.endpoints.len(),
        "Serving console settings"
    );
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(state.config.console.clone()),
    )
}
