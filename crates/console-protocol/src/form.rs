//! Reading and writing individual form inputs of a record draft
//!
//! Drafts are edited through their JSON form so that one generic modal can
//! render the inputs every entity declares in [`Record::form_fields`].

use console_types::{AppError, AppResult, FieldError, FieldKind, FormField, Record};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Text shown in the input bound to `key`
#[must_use]
pub fn read_field<T: Serialize>(draft: &T, key: &str) -> String {
    match serde_json::to_value(draft) {
        Ok(Value::Object(map)) => map.get(key).map(display_value).unwrap_or_default(),
        _ => String::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
            .map_or_else(|| n.to_string(), |f| format!("{f:.0}")),
        other => other.to_string(),
    }
}

/// Parse raw input text into the JSON value stored for a field
///
/// Blank input clears the field. Number inputs must parse as a number.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for a number input that does not parse.
pub fn parse_input(field: &FormField, raw: &str) -> AppResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    match field.kind {
        FieldKind::Number => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| {
                AppError::Validation(vec![FieldError::new(
                    field.key,
                    format!("{} must be a number", field.label),
                )])
            }),
        FieldKind::TextArea | FieldKind::Password => Ok(Value::String(raw.to_string())),
        _ => Ok(Value::String(trimmed.to_string())),
    }
}

/// Store raw input text into the draft
///
/// # Errors
///
/// Fails if the input does not parse or the patched draft no longer
/// deserializes into the record type.
pub fn write_field<T: Record>(draft: &mut T, field: &FormField, raw: &str) -> AppResult<()> {
    let value = parse_input(field, raw)?;
    let mut map = match serde_json::to_value(&*draft)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    // Absent keys fall back to the field's serde default.
    if value.is_null() {
        map.remove(field.key);
    } else {
        map.insert(field.key.to_string(), value);
    }
    *draft = serde_json::from_value(Value::Object(map))?;
    Ok(())
}
