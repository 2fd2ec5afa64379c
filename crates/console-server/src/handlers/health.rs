//! Health check handlers

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use console_core::utils::format_uptime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when the dashboard build is present, otherwise `degraded`
    pub status: String,
    /// Application version
    pub version: String,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Uptime as `1d 02:03:04`
    pub uptime: String,
    /// Dashboard asset status
    pub dashboard: DashboardHealth,
    /// Number of configured endpoints
    pub endpoints: usize,
}

/// Dashboard asset status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardHealth {
    /// Directory served to the browser
    pub static_dir: String,
    /// Whether the index page exists
    pub index_present: bool,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the dashboard can be served
    pub ready: bool,
    /// Current timestamp
    pub timestamp: DateTime<Utc>,
    /// Reason when not ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Basic health check endpoint
///
/// Always answers 200 while the process is up.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let index_present = state.has_dashboard();
    let uptime_seconds = state.uptime_seconds();

    Json(HealthResponse {
        status: if index_present { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds,
        uptime: format_uptime(uptime_seconds),
        dashboard: DashboardHealth {
            static_dir: state.config.server.static_dir.display().to_string(),
            index_present,
        },
        endpoints: state.config.console.endpoints.len(),
    })
}

/// Readiness check endpoint
///
/// Answers 503 until the compiled dashboard is in place.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if state.has_dashboard() {
        return (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                timestamp: Utc::now(),
                reason: None,
            }),
        );
    }

    let reason = format!("missing {}", state.index_path().display());
    warn!(%reason, "Readiness check failed");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ReadinessResponse {
            ready: false,
            timestamp: Utc::now(),
            reason: Some(reason),
        }),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use console_core::Config;
    use tempfile::TempDir;

    fn state_for(dir: &TempDir) -> Arc<AppState> {
        let mut config = Config::default();
        config.server.static_dir = dir.path().to_path_buf();
        Arc::new(AppState::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_degraded_without_dashboard() {
        let dir = TempDir::new().unwrap();
        let response = health_check(State(state_for(&dir))).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "degraded");
        assert!(!health.dashboard.index_present);
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_follows_index_page() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir);

        let response = readiness_check(State(Arc::clone(&state))).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        let response = readiness_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
