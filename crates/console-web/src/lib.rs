//! Browser dashboard for the admin console
//!
//! Every entity page is a [`components::ResourcePage`] over one
//! [`console_types::Record`] type: fetch, filter, paginate, mutate and
//! export, with the list state owned by a [`console_client::ResourceController`].

#![forbid(unsafe_code)]

pub mod app;
pub mod components;
pub mod context;
pub mod download;
pub mod logging;
pub mod pages;
pub mod storage;

pub use app::App;

/// Install the panic hook and the logger, then mount the dashboard
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(storage::get(storage::LOG_LEVEL_KEY).as_deref());
    leptos::mount::mount_to_body(App);
}
