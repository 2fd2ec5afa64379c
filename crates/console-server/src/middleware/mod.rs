//! Middleware for request tracing and cross-origin handling

pub mod cors;
pub mod logging;

pub use cors::cors_middleware;
pub use logging::{REQUEST_ID_HEADER, RESPONSE_TIME_HEADER, request_logging_middleware};

use axum::{http::StatusCode, response::Json};
use serde::Serialize;

/// Standard error response for middleware and unmatched routes
#[derive(Debug, Serialize)]
pub struct MiddlewareError {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl MiddlewareError {
    /// Create a new middleware error
    #[must_use]
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
            request_id: None,
        }
    }

    /// Create a middleware error with request ID
    #[must_use]
    pub fn with_request_id(error: &str, code: &str, request_id: String) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
            request_id: Some(request_id),
        }
    }
}

impl From<MiddlewareError> for (StatusCode, Json<MiddlewareError>) {
    fn from(error: MiddlewareError) -> Self {
        let status = match error.code.as_str() {
            "ORIGIN_NOT_ALLOWED" => StatusCode::FORBIDDEN,
            "ROUTE_NOT_FOUND" => StatusCode::NOT_FOUND,
            "INVALID_REQUEST" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(error))
    }
}
