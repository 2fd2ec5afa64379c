//! Browser local storage access

use console_types::Session;

/// Key holding `tracing` filter directives
pub const LOG_LEVEL_KEY: &str = "logLevel";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read a value from local storage
#[must_use]
pub fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Build the session from the stored `mentorId`
#[must_use]
pub fn session() -> Session {
    Session::from_storage_value(get(Session::MENTOR_ID_KEY))
}
