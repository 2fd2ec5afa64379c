//! Backend and endpoint settings consumed by the dashboard
//!
//! The host server serves these to the browser as `/config.json`; the native
//! configuration layer embeds them unchanged.

use crate::error::{AppError, AppResult};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder in endpoint paths replaced by the session mentor id
pub const MENTOR_ID_PLACEHOLDER: &str = "{mentorId}";

/// One remote REST service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL all endpoint paths are appended to
    pub base_url: String,

    /// Value sent in the `X-API-Key` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Shape wrapping the payload of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeShape {
    /// The body is the array itself
    Bare,
    /// `{ "data": [...] }`
    Data,
    /// `{ "success": true, "<key>": [...] }`
    Named(String),
}

impl EnvelopeShape {
    /// Human readable description used in errors
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Bare => "a bare array".to_string(),
            Self::Data => "an object with a 'data' array".to_string(),
            Self::Named(key) => format!("an object with a '{key}' array"),
        }
    }
}

/// Whether an entity is served by a real backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Real REST backend
    #[default]
    Live,
    /// In-memory placeholder data, flagged in the UI
    Demo,
}

/// One entity collection on a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Backend name, a key of [`ConsoleSettings::backends`]
    pub backend: String,

    /// Collection path, may contain `{mentorId}`
    pub path: String,

    /// Envelope the list response arrives in
    #[serde(default = "default_envelope")]
    pub envelope: EnvelopeShape,

    /// Live or demo data
    #[serde(default)]
    pub source: SourceKind,

    /// Rows per page on the list view
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Bulk creation path (JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_path: Option<String>,

    /// File import path (multipart)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_path: Option<String>,
}

impl EndpointSettings {
    /// Live endpoint with default envelope and page size
    pub fn live(backend: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            path: path.into(),
            envelope: default_envelope(),
            source: SourceKind::Live,
            page_size: default_page_size(),
            bulk_path: None,
            upload_path: None,
        }
    }

    /// Demo endpoint served from fixtures
    pub fn demo(backend: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Demo,
            ..Self::live(backend, path)
        }
    }

    /// Set the envelope shape
    #[must_use]
    pub fn with_envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the bulk creation path
    #[must_use]
    pub fn with_bulk_path(mut self, path: impl Into<String>) -> Self {
        self.bulk_path = Some(path.into());
        self
    }

    /// Set the file import path
    #[must_use]
    pub fn with_upload_path(mut self, path: impl Into<String>) -> Self {
        self.upload_path = Some(path.into());
        self
    }
}

/// Export choices offered by every list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Row limits offered in the export menu
    #[serde(default = "default_export_limits")]
    pub limits: Vec<usize>,

    /// Preselected limit
    #[serde(default = "default_export_limit")]
    pub default_limit: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            limits: default_export_limits(),
            default_limit: default_export_limit(),
        }
    }
}

/// Everything the dashboard needs to reach its backends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Backends by name
    pub backends: BTreeMap<String, BackendSettings>,

    /// Endpoints by key
    pub endpoints: BTreeMap<String, EndpointSettings>,

    /// Export menu settings
    #[serde(default)]
    pub export: ExportSettings,
}

/// An endpoint with its backend and session placeholders resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Endpoint key
    pub key: String,
    /// Collection URL
    pub url: String,
    /// Bulk creation URL
    pub bulk_url: Option<String>,
    /// File import URL
    pub upload_url: Option<String>,
    /// Envelope of list responses
    pub envelope: EnvelopeShape,
    /// Live or demo
    pub source: SourceKind,
    /// Rows per page
    pub page_size: usize,
    /// API key header value
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ResolvedEndpoint {
    /// URL of a single record, with the id percent-encoded as one segment
    #[must_use]
    pub fn record_url(&self, id: &crate::id::RecordId) -> String {
        format!("{}/{}", self.url, urlencoding::encode(id.as_str()))
    }
}

impl ConsoleSettings {
    /// Settings of an endpoint
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownEndpoint`] if the key is not configured.
    pub fn endpoint(&self, key: &str) -> AppResult<&EndpointSettings> {
        self.endpoints
            .get(key)
            .ok_or_else(|| AppError::UnknownEndpoint(key.to_string()))
    }

    /// Resolve an endpoint against its backend and the session
    ///
    /// # Errors
    ///
    /// Fails when the endpoint or its backend is unknown, or when the path
    /// needs a session value that is missing.
    pub fn resolve(&self, key: &str, session: &Session) -> AppResult<ResolvedEndpoint> {
        let endpoint = self.endpoint(key)?;
        let backend =
            self.backends
                .get(&endpoint.backend)
                .ok_or_else(|| AppError::UnknownBackend {
                    endpoint: key.to_string(),
                    backend: endpoint.backend.clone(),
                })?;

        let join = |path: &str| -> AppResult<String> {
            let path = resolve_placeholders(path, session)?;
            Ok(format!(
                "{}/{}",
                backend.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ))
        };

        Ok(ResolvedEndpoint {
            key: key.to_string(),
            url: join(&endpoint.path)?.trim_end_matches('/').to_string(),
            bulk_url: endpoint.bulk_path.as_deref().map(&join).transpose()?,
            upload_url: endpoint.upload_path.as_deref().map(&join).transpose()?,
            envelope: endpoint.envelope.clone(),
            source: endpoint.source,
            page_size: endpoint.page_size.max(1),
            api_key: backend.api_key.clone(),
            timeout_secs: backend.timeout_secs,
        })
    }
}

fn resolve_placeholders(path: &str, session: &Session) -> AppResult<String> {
    if path.contains(MENTOR_ID_PLACEHOLDER) {
        let mentor = session.require_mentor()?;
        Ok(path.replace(MENTOR_ID_PLACEHOLDER, &urlencoding::encode(mentor.as_str())))
    } else {
        Ok(path.to_string())
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        let backend = |port: u16| BackendSettings {
            base_url: format!("http://localhost:{port}/api"),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        };

        let backends = BTreeMap::from([
            ("identity".to_string(), backend(5001)),
            ("commerce".to_string(), backend(5002)),
            ("learning".to_string(), backend(5003)),
            ("health".to_string(), backend(5004)),
        ]);

        let named = |key: &str| EnvelopeShape::Named(key.to_string());
        let endpoints = BTreeMap::from([
            (
                "users".to_string(),
                EndpointSettings::live("identity", "/users").with_envelope(named("users")),
            ),
            (
                "staff".to_string(),
                EndpointSettings::live("identity", "/staff")
                    .with_envelope(EnvelopeShape::Data)
                    .with_upload_path("/staff/import"),
            ),
            (
                "mentors".to_string(),
                EndpointSettings::live("identity", "/mentors").with_envelope(EnvelopeShape::Bare),
            ),
            (
                "coupons".to_string(),
                EndpointSettings::live("commerce", "/coupons")
                    .with_envelope(named("coupons"))
                    .with_bulk_path("/coupons/bulk"),
            ),
            (
                "invoices".to_string(),
                EndpointSettings::live("commerce", "/invoices")
                    .with_envelope(EnvelopeShape::Data)
                    .with_page_size(5),
            ),
            (
                "bookings".to_string(),
                EndpointSettings::demo("commerce", "/bookings").with_envelope(EnvelopeShape::Bare),
            ),
            (
                "payments".to_string(),
                EndpointSettings::demo("commerce", "/payments").with_envelope(EnvelopeShape::Bare),
            ),
            (
                "enrollments".to_string(),
                EndpointSettings::live("learning", "/enrollments")
                    .with_envelope(EnvelopeShape::Data),
            ),
            (
                "mentor-enrollments".to_string(),
                EndpointSettings::live("learning", "/mentors/{mentorId}/enrollments")
                    .with_envelope(EnvelopeShape::Data)
                    .with_page_size(5),
            ),
            (
                "quizzes".to_string(),
                EndpointSettings::live("learning", "/quizzes").with_envelope(named("quizzes")),
            ),
            (
                "categories".to_string(),
                EndpointSettings::live("learning", "/categories")
                    .with_envelope(EnvelopeShape::Bare),
            ),
            (
                "doctors".to_string(),
                EndpointSettings::live("health", "/doctors").with_envelope(EnvelopeShape::Data),
            ),
        ]);

        Self {
            backends,
            endpoints,
            export: ExportSettings::default(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_envelope() -> EnvelopeShape {
    EnvelopeShape::Bare
}

const fn default_page_size() -> usize {
    10
}

fn default_export_limits() -> Vec<usize> {
    vec![10, 50, 100, 1000]
}

const fn default_export_limit() -> usize {
    50
}
