//! Application state management

use console_core::{Config, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// When the server started
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let state = Self {
            config,
            started_at: Instant::now(),
        };
        if !state.has_dashboard() {
            warn!(
                index = %state.index_path().display(),
                "Dashboard build not found; only the API routes will respond"
            );
        }
        Ok(state)
    }

    /// Path of the dashboard's index page
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.config.server.index_path()
    }

    /// Whether the compiled dashboard is present
    #[must_use]
    pub fn has_dashboard(&self) -> bool {
        self.index_path().is_file()
    }

    /// Seconds since startup
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
