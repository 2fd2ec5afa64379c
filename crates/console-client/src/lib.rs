//! Data sources and the resource controller of the admin console
//!
//! The same code runs natively (tests, tooling) and in the browser; async
//! traits drop their `Send` bound on `wasm32`.

#![forbid(unsafe_code)]

pub mod controller;
pub mod demo;
pub mod error;
pub mod http;
pub mod source;

pub use controller::{ResourceController, load_secondary};
pub use demo::DemoDataSource;
pub use error::{ClientError, ClientResult};
pub use http::{API_KEY_HEADER, HttpDataSource};
pub use source::DataSource;
