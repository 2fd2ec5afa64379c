//! Normalizing the response envelopes of the different backends
//!
//! The backends disagree on how a list is wrapped: a bare array,
//! `{ "data": [...] }`, or `{ "success": true, "<entity>": [...] }`. Each
//! endpoint declares its [`EnvelopeShape`] and everything past the fetch
//! boundary only sees the canonical [`Listing`].

use console_types::{AppError, AppResult, EnvelopeShape};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that carry status information rather than payload
const STATUS_KEYS: &[&str] = &["success", "message", "error", "status"];

/// Canonical result of a list fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    /// Records in response order (empty on error)
    pub items: Vec<T>,
    /// Error message, if the fetch failed
    pub error: Option<String>,
}

impl<T: DeserializeOwned> Listing<T> {
    /// Adapt a raw response body
    #[must_use]
    pub fn adapt(shape: &EnvelopeShape, body: Value) -> Self {
        Self::from_result(normalize_list(shape, body))
    }

    /// Back to a `Result`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Remote`] carrying the listing's error message.
    pub fn into_result(self) -> AppResult<Vec<T>> {
        match self.error {
            Some(message) => Err(AppError::Remote(message)),
            None => Ok(self.items),
        }
    }
}

impl<T> Listing<T> {
    /// Fold a fetch outcome into a listing
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) => Self { items, error: None },
            Err(error) => Self {
                items: Vec::new(),
                error: Some(error.to_string()),
            },
        }
    }
}

/// Extract the records of a list response
///
/// # Errors
///
/// Fails with [`AppError::Remote`] on `success: false`, with
/// [`AppError::Envelope`] when the body does not have the declared shape, and
/// with [`AppError::Serialization`] when a record does not deserialize.
pub fn normalize_list<T: DeserializeOwned>(
    shape: &EnvelopeShape,
    body: Value,
) -> AppResult<Vec<T>> {
    check_success(&body)?;

    let items = match (shape, body) {
        (EnvelopeShape::Bare, Value::Array(items)) => items,
        (EnvelopeShape::Data, Value::Object(mut map)) => take_array(&mut map, "data", shape)?,
        (EnvelopeShape::Named(key), Value::Object(mut map)) => take_array(&mut map, key, shape)?,
        (shape, other) => {
            return Err(AppError::Envelope {
                expected: shape.describe(),
                found: describe(&other),
            });
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(AppError::from))
        .collect()
}

fn take_array(
    map: &mut Map<String, Value>,
    key: &str,
    shape: &EnvelopeShape,
) -> AppResult<Vec<Value>> {
    match map.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(AppError::Envelope {
            expected: shape.describe(),
            found: format!("'{key}' holding {}", describe(&other)),
        }),
        None => Err(AppError::Envelope {
            expected: shape.describe(),
            found: describe(&Value::Object(std::mem::take(map))),
        }),
    }
}

/// Extract a single record from a create/update/get response
///
/// Accepts a bare object, `{ "data": {...} }`, or a wrapper whose only
/// payload key holds an object (`{ "success": true, "coupon": {...} }`).
///
/// # Errors
///
/// Fails with [`AppError::Remote`] on `success: false` and with
/// [`AppError::Serialization`] when the record does not deserialize.
pub fn normalize_one<T: DeserializeOwned>(body: Value) -> AppResult<T> {
    check_success(&body)?;
    Ok(serde_json::from_value(unwrap_single(body))?)
}

fn unwrap_single(body: Value) -> Value {
    let Value::Object(mut map) = body else {
        return body;
    };

    if matches!(map.get("data"), Some(Value::Object(_))) {
        return map.remove("data").unwrap_or(Value::Null);
    }

    let mut payload = map
        .iter()
        .filter(|(key, _)| !STATUS_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.is_object()));

    match (payload.next(), payload.next()) {
        (Some((key, true)), None) => map.remove(&key).unwrap_or(Value::Null),
        _ => Value::Object(map),
    }
}

/// Reject bodies that report `success: false`
///
/// # Errors
///
/// Returns [`AppError::Remote`] with the body's `message` or `error`.
pub fn check_success(body: &Value) -> AppResult<()> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(AppError::Remote(
            error_message(body).unwrap_or_else(|| "request was not successful".to_string()),
        ));
    }
    Ok(())
}

/// Human readable message carried in an error body
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| match body.get(key) {
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            _ => None,
        })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(map) if map.is_empty() => "an empty object".to_string(),
        Value::Object(map) => format!(
            "an object with keys {}",
            map.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Counts reported by a bulk create or import endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Records created
    pub created: usize,
    /// Records rejected
    pub failed: usize,
    /// Per-record error messages, when reported
    pub errors: Vec<String>,
}

impl BulkOutcome {
    /// Read the counts from a bulk response
    ///
    /// Counts may be reported as `created`/`createdCount` and
    /// `failed`/`failedCount`, either as numbers or as arrays of records,
    /// optionally wrapped in `data`.
    ///
    /// # Errors
    ///
    /// Fails with [`AppError::Remote`] on `success: false`.
    pub fn from_body(body: &Value) -> AppResult<Self> {
        check_success(body)?;
        let root = match body.get("data") {
            Some(inner @ Value::Object(_)) => inner,
            _ => body,
        };

        let errors = root
            .get("errors")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        other => error_message(other),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let failed = count(root, &["failed", "failedCount"]).unwrap_or(errors.len());

        Ok(Self {
            created: count(root, &["created", "createdCount", "inserted"]).unwrap_or(0),
            failed,
            errors,
        })
    }

    /// Whether some records were rejected
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Message shown after the bulk request
    #[must_use]
    pub fn summary(&self) -> String {
        if self.has_failures() {
            format!("Created {}, failed {}", self.created, self.failed)
        } else {
            format!("Created {}", self.created)
        }
    }
}

fn count(root: &Value, keys: &[&str]) -> Option<usize> {
    keys.iter().find_map(|key| match root.get(key) {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(Value::Array(items)) => Some(items.len()),
        _ => None,
    })
}
