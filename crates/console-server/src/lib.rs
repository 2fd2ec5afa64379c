//! Host server for the admin console
//!
//! Serves the compiled dashboard, the runtime settings it reads at startup
//! and the health routes used by the deployment.

#![forbid(unsafe_code)]

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use console_core::Config;
use console_core::context_error::Result;
use std::sync::Arc;

/// Build the router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the configuration does not validate.
pub fn build_router(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(routes::app(state))
}
