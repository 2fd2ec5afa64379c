//! Error type shared by the pure console crates

use crate::schema::FieldError;
use thiserror::Error;

/// Result alias for operations that fail with [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised by record handling, settings resolution and exports
#[derive(Error, Debug)]
pub enum AppError {
    /// A record that must carry an identity key did not
    #[error("{entity} record has no id")]
    MissingId {
        /// Entity slug of the offending record
        entity: &'static str,
    },

    /// No endpoint is configured under the given key
    #[error("no endpoint configured for '{0}'")]
    UnknownEndpoint(String),

    /// An endpoint refers to a backend that is not configured
    #[error("endpoint '{endpoint}' refers to unknown backend '{backend}'")]
    UnknownBackend {
        /// Endpoint key
        endpoint: String,
        /// Missing backend name
        backend: String,
    },

    /// A session value required to resolve an endpoint is absent
    #[error("session has no {0}")]
    MissingSessionValue(&'static str),

    /// The response body did not have the envelope the endpoint declares
    #[error("unexpected response envelope: expected {expected}, found {found}")]
    Envelope {
        /// Shape the endpoint is configured for
        expected: String,
        /// Short description of what arrived
        found: String,
    },

    /// The backend answered with `success: false`
    #[error("{0}")]
    Remote(String),

    /// JSON (de)serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Draft failed its validation schema
    #[error("{}", first_message(.0))]
    Validation(Vec<FieldError>),

    /// A report writer failed
    #[error("export failed: {0}")]
    Export(String),

    /// An operation was attempted in a state that does not allow it
    #[error("invalid state: {0}")]
    InvalidState(String),
}

fn first_message(errors: &[FieldError]) -> String {
    errors
        .first()
        .map_or_else(|| "validation failed".to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error_shows_first_message() {
        let error = AppError::Validation(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Email is required"),
        ]);
        assert_eq!(error.to_string(), "Name is required");
    }

    #[test]
    fn test_empty_validation_error_has_fallback() {
        assert_eq!(AppError::Validation(vec![]).to_string(), "validation failed");
    }

    #[test]
    fn test_serialization_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let error = AppError::from(json_error);
        assert!(error.to_string().starts_with("serialization error"));
    }

    #[test]
    fn test_unknown_backend_display() {
        let error = AppError::UnknownBackend {
            endpoint: "coupons".to_string(),
            backend: "billing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "endpoint 'coupons' refers to unknown backend 'billing'"
        );
    }
}
