//! CORS middleware for cross-origin request handling

use super::MiddlewareError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// CORS middleware driven by `api.enable_cors` and `api.cors_origins`
///
/// Requests without an `Origin` header are same-origin and pass through.
pub async fn cors_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.api.enable_cors {
        return next.run(request).await;
    }

    let Some(origin) = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
    else {
        return next.run(request).await;
    };

    debug!("CORS request from origin: {}", origin);

    let origins = &state.config.api.cors_origins;
    if !is_origin_allowed(&origin, origins) {
        warn!("Origin {} not allowed by CORS policy", origin);
        let rejection: (StatusCode, Json<MiddlewareError>) =
            MiddlewareError::new("Origin not allowed", "ORIGIN_NOT_ALLOWED").into();
        return rejection.into_response();
    }

    if request.method() == Method::OPTIONS {
        debug!("Handling CORS preflight request");
        return build_preflight_response(&origin, origins);
    }

    let mut response = next.run(request).await;
    add_cors_headers(&mut response, &origin, origins);
    response
}

/// Check if the given origin is allowed by the CORS policy
///
/// Supports `*`, exact origins and `*.domain` subdomain patterns.
fn is_origin_allowed(origin: &str, allowed_origins: &[String]) -> bool {
    allowed_origins.iter().any(|allowed| {
        allowed == "*"
            || allowed == origin
            || allowed
                .strip_prefix('*')
                .is_some_and(|suffix| suffix.starts_with('.') && origin.ends_with(suffix))
    })
}

fn is_wildcard(allowed_origins: &[String]) -> bool {
    allowed_origins.iter().any(|allowed| allowed == "*")
}

/// Build a preflight response for OPTIONS requests
fn build_preflight_response(origin: &str, allowed_origins: &[String]) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    add_cors_headers(&mut response, origin, allowed_origins);

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS, HEAD"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Accept, Content-Type, Authorization, X-API-Key, X-Request-ID"),
    );
    // 24 hours
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));

    response
}

/// Add CORS headers to a response
fn add_cors_headers(response: &mut Response, origin: &str, allowed_origins: &[String]) {
    let headers = response.headers_mut();

    if is_wildcard(allowed_origins) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    } else {
        if let Ok(origin_header) = HeaderValue::from_str(origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_header);
        }
        headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    }

    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Response-Time, X-Request-ID"),
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_origin_allowed_wildcard() {
        let origins = vec!["*".to_string()];
        assert!(is_origin_allowed("https://example.com", &origins));
        assert!(is_origin_allowed("http://localhost:3000", &origins));
    }

    #[test]
    fn test_is_origin_allowed_exact_match() {
        let origins = vec![
            "https://admin.example.com".to_string(),
            "http://localhost:3000".to_string(),
        ];
        assert!(is_origin_allowed("https://admin.example.com", &origins));
        assert!(is_origin_allowed("http://localhost:3000", &origins));
        assert!(!is_origin_allowed("https://evil.com", &origins));
    }

    #[test]
    fn test_is_origin_allowed_wildcard_subdomain() {
        let origins = vec!["*.example.com".to_string()];
        assert!(is_origin_allowed("https://admin.example.com", &origins));
        assert!(is_origin_allowed("https://www.example.com", &origins));
        assert!(!is_origin_allowed("https://example.com", &origins));
        assert!(!is_origin_allowed("https://notexample.com", &origins));
    }

    #[test]
    fn test_is_origin_allowed_empty_list() {
        assert!(!is_origin_allowed("https://example.com", &[]));
    }

    #[test]
    fn test_preflight_for_listed_origin() {
        let origins = vec!["https://admin.example.com".to_string()];
        let response = build_preflight_response("https://admin.example.com", &origins);

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://admin.example.com"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
        assert!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
                .unwrap()
                .to_str()
                .unwrap()
                .contains("X-API-Key")
        );
    }

    #[test]
    fn test_wildcard_skips_credentials() {
        let mut response = StatusCode::OK.into_response();
        add_cors_headers(&mut response, "https://anywhere.dev", &["*".to_string()]);

        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
}
