//! Create/edit/delete modal state machine
//!
//! ```text
//! Closed ──open_create/open_edit──▶ Open ──begin_submit──▶ Submitting
//!   ▲                               ▲  │                      │
//!   │                               │  └──invalid draft───────┤ (stays Open)
//!   │                               └─────submit_failed───────┤
//!   └───────────────submit_succeeded / cancel─────────────────┘
//! Closed ──request_delete──▶ ConfirmDelete ──take_delete/cancel──▶ Closed
//! ```

use crate::form;
use console_types::{AppError, AppResult, FieldError, FormField, Record, RecordId};
use thiserror::Error;
use tracing::debug;

/// Whether the modal creates a new record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    /// New record, sent with POST
    Create,
    /// Existing record, sent with PUT
    Edit(RecordId),
}

/// State of an entity page's modal
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState<T> {
    /// Nothing shown
    #[default]
    Closed,
    /// Form shown and editable
    Open {
        /// Create or edit
        mode: ModalMode,
        /// Uncommitted copy bound to the inputs
        draft: T,
        /// Inline message of the last failure
        error: Option<String>,
        /// Per-field validation messages
        field_errors: Vec<FieldError>,
    },
    /// Request in flight, inputs locked
    Submitting {
        /// Create or edit
        mode: ModalMode,
        /// Draft being sent
        draft: T,
    },
    /// Waiting for the user to confirm a delete
    ConfirmDelete {
        /// Record to delete
        id: RecordId,
    },
}

/// Why a modal transition was refused
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModalError {
    /// A submit is already in flight
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// The transition needs an open form
    #[error("the form is not open")]
    NotOpen,

    /// The draft failed its schema
    #[error("{}", .0.first().map_or("validation failed", |e| e.message.as_str()))]
    Invalid(Vec<FieldError>),
}

impl From<ModalError> for AppError {
    fn from(error: ModalError) -> Self {
        match error {
            ModalError::Invalid(errors) => Self::Validation(errors),
            other => Self::InvalidState(other.to_string()),
        }
    }
}

/// A validated draft handed to the data source
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<T> {
    /// Create or edit
    pub mode: ModalMode,
    /// Validated draft
    pub draft: T,
}

impl<T: Record> ModalState<T> {
    /// Open a blank create form
    pub fn open_create(&mut self) {
        *self = Self::Open {
            mode: ModalMode::Create,
            draft: T::blank(),
            error: None,
            field_errors: Vec::new(),
        };
    }

    /// Open an edit form prefilled from a copy of the record
    ///
    /// # Errors
    ///
    /// Fails if the record has no id to target.
    pub fn open_edit(&mut self, record: &T) -> AppResult<()> {
        let id = record
            .id()
            .cloned()
            .ok_or(AppError::MissingId { entity: T::ENTITY })?;
        *self = Self::Open {
            mode: ModalMode::Edit(id),
            draft: record.clone(),
            error: None,
            field_errors: Vec::new(),
        };
        Ok(())
    }

    /// Whether the form or the delete confirmation is showing
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a submit is in flight
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// The draft being edited or sent
    #[must_use]
    pub const fn draft(&self) -> Option<&T> {
        match self {
            Self::Open { draft, .. } | Self::Submitting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Create or edit, while the form is showing
    #[must_use]
    pub const fn mode(&self) -> Option<&ModalMode> {
        match self {
            Self::Open { mode, .. } | Self::Submitting { mode, .. } => Some(mode),
            _ => None,
        }
    }

    /// Inline error of an open form
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Message attached to one field
    #[must_use]
    pub fn field_error(&self, key: &str) -> Option<&str> {
        match self {
            Self::Open { field_errors, .. } => field_errors
                .iter()
                .find(|e| e.field == key)
                .map(|e| e.message.as_str()),
            _ => None,
        }
    }

    /// Modify the draft of an open form; returns whether it was applied
    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut T)) -> bool {
        match self {
            Self::Open { draft, .. } => {
                edit(draft);
                true
            }
            _ => false,
        }
    }

    /// Store raw input text into one field of the draft
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::NotOpen`] outside the open state and
    /// [`ModalError::Invalid`] for input that does not parse; the message is
    /// also attached to the field.
    pub fn edit_field(&mut self, field: &FormField, raw: &str) -> Result<(), ModalError> {
        let Self::Open {
            draft,
            field_errors,
            ..
        } = self
        else {
            return Err(ModalError::NotOpen);
        };

        field_errors.retain(|e| e.field != field.key);
        match form::write_field(draft, field, raw) {
            Ok(()) => Ok(()),
            Err(AppError::Validation(errors)) => {
                field_errors.extend(errors.iter().cloned());
                Err(ModalError::Invalid(errors))
            }
            Err(other) => {
                let error = FieldError::new(field.key, other.to_string());
                field_errors.push(error.clone());
                Err(ModalError::Invalid(vec![error]))
            }
        }
    }

    /// Validate the draft and lock the form
    ///
    /// # Errors
    ///
    /// Refuses while already submitting or when nothing is open. An invalid
    /// draft keeps the form open with the first message shown inline.
    pub fn begin_submit(&mut self) -> Result<Submission<T>, ModalError> {
        let (mode, draft) = match std::mem::take(self) {
            Self::Open { mode, draft, .. } => (mode, draft),
            submitting @ Self::Submitting { .. } => {
                *self = submitting;
                return Err(ModalError::AlreadySubmitting);
            }
            other => {
                *self = other;
                return Err(ModalError::NotOpen);
            }
        };

        if let Err(errors) = T::schema().validate(&draft) {
            debug!(entity = T::ENTITY, count = errors.len(), "Draft rejected by schema");
            *self = Self::Open {
                mode,
                draft,
                error: errors.first().map(|e| e.message.clone()),
                field_errors: errors.clone(),
            };
            return Err(ModalError::Invalid(errors));
        }

        *self = Self::Submitting {
            mode: mode.clone(),
            draft: draft.clone(),
        };
        Ok(Submission { mode, draft })
    }

    /// Unlock the form after a failed request, keeping the draft
    pub fn submit_failed(&mut self, message: impl Into<String>) {
        if let Self::Submitting { mode, draft } = std::mem::take(self) {
            *self = Self::Open {
                mode,
                draft,
                error: Some(message.into()),
                field_errors: Vec::new(),
            };
        }
    }

    /// Unlock the form after the backend rejected individual fields
    pub fn submit_rejected(&mut self, errors: Vec<FieldError>) {
        if let Self::Submitting { mode, draft } = std::mem::take(self) {
            *self = Self::Open {
                mode,
                draft,
                error: errors.first().map(|e| e.message.clone()),
                field_errors: errors,
            };
        }
    }

    /// Close the form after a successful request
    pub fn submit_succeeded(&mut self) {
        *self = Self::Closed;
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, id: RecordId) {
        if !self.is_submitting() {
            *self = Self::ConfirmDelete { id };
        }
    }

    /// Confirm a pending delete, closing the modal and yielding the id
    pub fn take_delete(&mut self) -> Option<RecordId> {
        match std::mem::take(self) {
            Self::ConfirmDelete { id } => Some(id),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Dismiss the modal; refused while a submit is in flight
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = Self::Closed;
        true
    }
}
