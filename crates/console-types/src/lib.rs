//! Typed records and settings shared by every admin console crate
//!
//! Nothing in here performs I/O. The records mirror what the external REST
//! backends return; the console only ever holds page-scoped copies of them.

#![forbid(unsafe_code)]

pub mod entities;
pub mod error;
pub mod id;
pub mod record;
pub mod schema;
pub mod session;
pub mod settings;
pub mod upload;

pub use error::{AppError, AppResult};
pub use id::RecordId;
pub use record::{Column, Facet, FieldKind, FormField, Record, NOT_AVAILABLE};
pub use schema::{Check, FieldError, FieldRule, Schema};
pub use session::{Role, Session};
pub use settings::{
    BackendSettings, ConsoleSettings, EndpointSettings, EnvelopeShape, ExportSettings,
    ResolvedEndpoint, SourceKind,
};
pub use upload::FileUpload;
