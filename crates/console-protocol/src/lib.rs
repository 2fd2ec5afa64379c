//! List, modal and export logic behind every admin console page
//!
//! Everything here is synchronous and free of I/O: a page's visible rows are
//! a pure function of its [`ListView`], mutations are mirrored into the
//! collection by [`mutation::apply`], and exports turn the filtered rows into
//! bytes the browser downloads.

#![forbid(unsafe_code)]

pub mod envelope;
pub mod export;
pub mod form;
pub mod list;
pub mod modal;
pub mod mutation;
pub mod pagination;

pub use console_types::schema;

pub use envelope::{BulkOutcome, Listing, normalize_list, normalize_one};
pub use export::{ExportFile, ExportFormat, ExportRequest, export};
pub use list::{FilterValue, ListQuery, ListView, LoadStatus, VisibleSlice};
pub use modal::{ModalError, ModalMode, ModalState, Submission};
pub use mutation::{MirrorOutcome, Mutation};
pub use pagination::PageWindow;
