//! Declarative per-entity validation
//!
//! A schema is evaluated against the draft serialized to JSON, so the create
//! form and the edit form of an entity share exactly one set of rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single check applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Value must be present and not blank
    Required,
    /// Text must have at least this many characters
    MinLength(usize),
    /// Value must be numeric and inside the inclusive bounds
    Range {
        /// Lower bound
        min: Option<f64>,
        /// Upper bound
        max: Option<f64>,
    },
    /// Text must look like an e-mail address
    Email,
    /// Value must equal another field of the same draft
    MatchesField(&'static str),
    /// Text must be one of the listed values
    OneOf(&'static [&'static str]),
}

/// Rules attached to one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// JSON key of the field
    pub field: &'static str,
    /// Label used in messages
    pub label: &'static str,
    /// Checks evaluated in order, the first failure wins
    pub checks: Vec<Check>,
}

/// A failed check, shown inline in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// JSON key of the field
    pub field: String,
    /// User-facing message
    pub message: String,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered validation rules of an entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    /// Empty schema, every draft passes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    #[must_use]
    pub fn field(
        mut self,
        field: &'static str,
        label: &'static str,
        checks: impl Into<Vec<Check>>,
    ) -> Self {
        self.rules.push(FieldRule {
            field,
            label,
            checks: checks.into(),
        });
        self
    }

    /// Declared rules
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate a serializable draft
    ///
    /// # Errors
    ///
    /// Returns every field that failed, in rule order.
    pub fn validate<T: Serialize>(&self, draft: &T) -> Result<(), Vec<FieldError>> {
        let value = serde_json::to_value(draft)
            .map_err(|e| vec![FieldError::new("", format!("draft is not serializable: {e}"))])?;
        let errors = self.validate_value(&value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a draft already in JSON form
    #[must_use]
    pub fn validate_value(&self, draft: &Value) -> Vec<FieldError> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let value = draft.get(rule.field).unwrap_or(&Value::Null);
                rule.checks
                    .iter()
                    .find_map(|check| evaluate(check, rule, value, draft))
                    .map(|message| FieldError::new(rule.field, message))
            })
            .collect()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn evaluate(check: &Check, rule: &FieldRule, value: &Value, draft: &Value) -> Option<String> {
    let label = rule.label;
    if let Check::Required = check {
        return is_blank(value).then(|| format!("{label} is required"));
    }
    // Optional fields are only checked once something was entered.
    if is_blank(value) {
        return None;
    }
    match check {
        Check::Required => None,
        Check::MinLength(min) => value
            .as_str()
            .filter(|s| s.chars().count() < *min)
            .map(|_| format!("{label} must be at least {min} characters")),
        Check::Range { min, max } => match as_number(value) {
            None => Some(format!("{label} must be a number")),
            Some(n) if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) => {
                Some(match (min, max) {
                    (Some(lo), Some(hi)) => format!("{label} must be between {lo} and {hi}"),
                    (Some(lo), None) => format!("{label} must be at least {lo}"),
                    (None, Some(hi)) => format!("{label} must be at most {hi}"),
                    (None, None) => format!("{label} is out of range"),
                })
            }
            Some(_) => None,
        },
        Check::Email => (!value.as_str().is_some_and(looks_like_email))
            .then(|| format!("{label} must be a valid e-mail address")),
        Check::MatchesField(other) => {
            let other_value = draft.get(*other).unwrap_or(&Value::Null);
            (value != other_value).then(|| format!("{label} does not match"))
        }
        Check::OneOf(allowed) => (!value.as_str().is_some_and(|s| allowed.contains(&s)))
            .then(|| format!("{label} must be one of: {}", allowed.join(", "))),
    }
}
