//! Configuration management for the admin console host
//!
//! Layers, lowest first: built-in defaults, an optional `console.toml`, then
//! `ADMIN_CONSOLE_*` environment variables. Nested keys use a double
//! underscore, e.g. `ADMIN_CONSOLE_SERVER__PORT=9000` or
//! `ADMIN_CONSOLE_CONSOLE__BACKENDS__IDENTITY__API_KEY=...`.

use console_types::ConsoleSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ADMIN_CONSOLE";

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "console";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Backends and endpoints handed to the dashboard
    #[serde(default)]
    pub console: ConsoleSettings,

    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled dashboard
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Page served for client-side routes
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

/// API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

const fn default_enable_cors() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            index_file: default_index_file(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: default_enable_cors(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether structured JSON output is requested
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl ServerConfig {
    /// Full path of the index page
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

impl Config {
    /// Load configuration from `console.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file plus environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = config::Config::try_from(&Self::default()).map_err(configuration)?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("api.cors_origins")
                    .try_parsing(true),
            )
            .build()
            .map_err(configuration)?
            .try_deserialize()
            .map_err(configuration)
    }

    /// Check the settings the host depends on
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unusable port, an empty index name
    /// or an endpoint pointing at an unknown backend.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::Validation {
                field: "server.port".to_string(),
                message: "must not be 0".to_string(),
            });
        }
        if self.server.index_file.trim().is_empty() {
            return Err(crate::Error::Validation {
                field: "server.index_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        for (key, endpoint) in &self.console.endpoints {
            if !self.console.backends.contains_key(&endpoint.backend) {
                return Err(crate::Error::Validation {
                    field: format!("console.endpoints.{key}.backend"),
                    message: format!("unknown backend '{}'", endpoint.backend),
                });
            }
        }
        Ok(())
    }
}

fn configuration(error: config::ConfigError) -> crate::Error {
    crate::Error::Configuration {
        message: error.to_string(),
    }
}
