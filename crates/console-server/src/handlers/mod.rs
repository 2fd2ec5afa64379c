//! HTTP request handlers

pub mod health;
pub mod settings;

pub use health::{health_check, readiness_check};
pub use settings::console_settings;
