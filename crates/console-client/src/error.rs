//! Client error types

use console_protocol::ModalError;
use console_types::{AppError, FieldError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Request failed with status {code}{}", detail(.body))]
    Status {
        /// HTTP status code
        code: u16,
        /// Error message or raw body returned by the backend
        body: String,
    },

    /// Authentication required or rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend or the schema rejected the draft
    #[error("{}", first_message(.0))]
    Validation(Vec<FieldError>),

    /// The body could not be interpreted
    #[error(transparent)]
    Protocol(#[from] AppError),

    /// A newer request superseded this one
    #[error("Request was superseded")]
    Aborted,

    /// The endpoint is not set up for the requested operation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the failure means the request was cancelled on purpose
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Field-level messages to attach to form inputs
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) | Self::Protocol(AppError::Validation(errors)) => errors,
            _ => &[],
        }
    }
}

impl From<ModalError> for ClientError {
    fn from(error: ModalError) -> Self {
        match error {
            ModalError::Invalid(errors) => Self::Validation(errors),
            other => Self::Protocol(other.into()),
        }
    }
}

fn detail(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

fn first_message(errors: &[FieldError]) -> String {
    errors
        .first()
        .map_or_else(|| "Validation failed".to_string(), ToString::to_string)
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_display() {
        let error = ClientError::Status {
            code: 500,
            body: String::new(),
        };
        assert_eq!(error.to_string(), "Request failed with status 500");

        let error = ClientError::Status {
            code: 502,
            body: "upstream down".to_string(),
        };
        assert_eq!(error.to_string(), "Request failed with status 502: upstream down");
    }

    #[test]
    fn test_validation_display_and_fields() {
        let error = ClientError::Validation(vec![FieldError::new("code", "Code is taken")]);
        assert_eq!(error.to_string(), "Code is taken");
        assert_eq!(error.field_errors().len(), 1);
        assert!(ClientError::Aborted.field_errors().is_empty());
    }

    #[test]
    fn test_modal_error_conversion() {
        let error: ClientError = ModalError::AlreadySubmitting.into();
        assert!(matches!(error, ClientError::Protocol(AppError::InvalidState(_))));
    }
}
