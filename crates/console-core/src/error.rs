//! Error types for the admin console host

use std::{error::Error as StdError, fmt};

/// Main error type for the console host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    Configuration {
        /// Error message
        message: String,
    },

    /// A loaded setting is unusable
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "invalid type: string \"abc\", expected u16".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Configuration error: invalid type: string \"abc\", expected u16"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = Error::Validation {
            field: "server.port".to_string(),
            message: "must not be 0".to_string(),
        };

        assert_eq!(error.to_string(), "Validation error: server.port - must not be 0");
        assert!(error.source().is_none());
    }
}
