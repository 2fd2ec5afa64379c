//! Configuration, errors and logging for the admin console host

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod utils;

/// Simple error context handling for the binaries
pub mod context_error {
    use std::{error::Error as StdError, fmt};

    /// A simple error type that can wrap any error with context
    #[derive(Debug)]
    pub struct ContextError {
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: String,
    }

    impl ContextError {
        /// Create a new context error from a message
        pub fn new<S: Into<String>>(message: S) -> Self {
            Self {
                source: None,
                message: message.into(),
            }
        }

        /// Create a new context error from an existing error with context
        pub fn with_context<E, S>(error: E, message: S) -> Self
        where
            E: StdError + Send + Sync + 'static,
            S: Into<String>,
        {
            Self {
                source: Some(Box::new(error)),
                message: message.into(),
            }
        }
    }

    impl fmt::Display for ContextError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl StdError for ContextError {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn StdError + 'static))
        }
    }

    /// Result type alias for context errors
    pub type Result<T> = std::result::Result<T, ContextError>;

    /// Create a context error from a message or format string
    #[macro_export]
    macro_rules! context_error {
        ($msg:literal) => {
            $crate::context_error::ContextError::new($msg)
        };
        ($fmt:expr, $($arg:tt)*) => {
            $crate::context_error::ContextError::new(format!($fmt, $($arg)*))
        };
    }

    impl From<crate::Error> for ContextError {
        fn from(err: crate::Error) -> Self {
            let message = err.to_string();
            Self::with_context(err, message)
        }
    }
}

// Re-export commonly used types
pub use config::{ApiConfig, Config, LoggingConfig, ServerConfig};
pub use error::{Error, Result};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(logging: &LoggingConfig) -> context_error::Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| context_error::ContextError::with_context(e, "Failed to install logger"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::context_error::ContextError;
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as StdError;

    #[test]
    fn test_context_error_macro() {
        let error = context_error!("Failed to bind to {}: {}", "0.0.0.0:8080", "in use");
        assert_eq!(error.to_string(), "Failed to bind to 0.0.0.0:8080: in use");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_core_error_keeps_message_and_source() {
        let error: ContextError = Error::Validation {
            field: "server.port".to_string(),
            message: "must not be 0".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Validation error: server.port - must not be 0");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_second_logger_install_fails() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "text".to_string(),
        };
        let _ = init_logging(&logging);
        assert!(init_logging(&logging).is_err());
    }
}
