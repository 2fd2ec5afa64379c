//! Route definitions for the console host

use crate::{
    handlers,
    middleware::{MiddlewareError, cors_middleware, request_logging_middleware},
    state::AppState,
};
use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    routing::{any, get},
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
};
use tracing::debug;

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
}

/// Build the runtime settings route and the JSON 404 for `/api`
pub fn settings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/config.json", get(handlers::console_settings))
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
}

/// Build the full application with static assets and middleware
///
/// Unknown paths outside `/api` get the dashboard's index page so
/// client-side routes survive a reload.
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let assets = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(state.index_path()));

    Router::new()
        .merge(health_routes())
        .merge(settings_routes())
        .fallback_service(assets)
        .layer(middleware::from_fn_with_state(Arc::clone(&state), cors_middleware))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// The host serves no API of its own
async fn api_not_found(uri: Uri) -> (StatusCode, Json<MiddlewareError>) {
    debug!(%uri, "No API route on the console host");
    MiddlewareError::new(
        &format!("The requested endpoint '{}' does not exist", uri.path()),
        "ROUTE_NOT_FOUND",
    )
    .into()
}
