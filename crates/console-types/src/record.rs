//! The `Record` abstraction every list page is generic over

use crate::id::RecordId;
use crate::schema::Schema;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// Placeholder written for missing values in exports and tables
pub const NOT_AVAILABLE: &str = "N/A";

/// A remote entity the console can list, edit, delete and export
pub trait Record:
    Clone + fmt::Debug + PartialEq + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Slug used in filenames and log fields (`coupon`, `user`, ...)
    const ENTITY: &'static str;

    /// Human readable plural label for headings
    const LABEL: &'static str;

    /// Identity key, `None` for drafts that were never saved
    fn id(&self) -> Option<&RecordId>;

    /// Assign the identity key (used by in-memory sources)
    fn set_id(&mut self, id: RecordId);

    /// String fields the search box matches against
    fn search_fields(&self) -> Vec<&str>;

    /// Categorical dimensions this entity can be filtered by
    fn facets() -> &'static [Facet] {
        &[]
    }

    /// Value of a categorical dimension for this record
    fn facet(&self, _dimension: &str) -> Option<String> {
        None
    }

    /// Hand-picked export and table projection
    fn columns() -> Vec<Column<Self>>;

    /// Inputs rendered by the create/edit modal
    fn form_fields() -> &'static [FormField];

    /// Validation shared by the create and edit forms
    fn schema() -> Schema {
        Schema::default()
    }

    /// Blank template a create form starts from
    fn blank() -> Self {
        Self::default()
    }
}

/// A filterable dimension of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facet {
    /// Key passed to [`Record::facet`]
    pub dimension: &'static str,
    /// Label of the filter control
    pub label: &'static str,
}

impl Facet {
    /// Declare a facet
    #[must_use]
    pub const fn new(dimension: &'static str, label: &'static str) -> Self {
        Self { dimension, label }
    }
}

/// One projected column: a header plus an accessor
pub struct Column<T> {
    /// Column header
    pub header: &'static str,
    /// Field accessor, `None` renders as [`NOT_AVAILABLE`]
    pub value: fn(&T) -> Option<String>,
}

impl<T> Column<T> {
    /// Declare a column
    #[must_use]
    pub const fn new(header: &'static str, value: fn(&T) -> Option<String>) -> Self {
        Self { header, value }
    }

    /// Projected cell text with the missing-value fallback applied
    pub fn cell(&self, record: &T) -> String {
        (self.value)(record)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("header", &self.header).finish()
    }
}

/// Kind of input a form field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    TextArea,
    /// Numeric input, stored as a JSON number
    Number,
    /// E-mail input
    Email,
    /// Masked input
    Password,
    /// Date input (`YYYY-MM-DD`)
    Date,
    /// Fixed choice list
    Select(&'static [&'static str]),
}

/// One input of a create/edit form, keyed by the record's JSON field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// JSON key inside the serialized record
    pub key: &'static str,
    /// Input label
    pub label: &'static str,
    /// Input kind
    pub kind: FieldKind,
    /// Whether the input carries the HTML `required` attribute
    pub required: bool,
}

impl FormField {
    /// Optional input
    #[must_use]
    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
        }
    }

    /// Required input
    #[must_use]
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }
}

/// Render an optional number the way tables show it
#[must_use]
pub fn number_cell(value: Option<f64>) -> Option<String> {
    value.map(|n| {
        if n.fract() == 0.0 && n.abs() < 1e15 {
            format!("{n:.0}")
        } else {
            format!("{n:.2}")
        }
    })
}
