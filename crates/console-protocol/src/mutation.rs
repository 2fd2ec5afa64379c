//! Mirroring confirmed server mutations into the local collection

use console_types::{AppError, AppResult, Record, RecordId};
use tracing::debug;

/// A mutation the server has confirmed
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    /// Record created, as returned by the server (carries the server id)
    Created(T),
    /// Record updated, as returned by the server
    Updated(T),
    /// Record deleted
    Deleted(RecordId),
}

/// What mirroring did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// New record appended at the end
    Appended,
    /// Record at this position replaced
    Replaced(usize),
    /// This many records removed
    Removed(usize),
    /// No local record carries the id; nothing changed
    Missing,
}

/// Apply a confirmed mutation to the collection
///
/// Create appends (or replaces when the server reuses an id that is already
/// listed), update replaces in place keeping the position, delete removes
/// every record with the id.
///
/// # Errors
///
/// Returns [`AppError::MissingId`] if a created or updated record has no id.
pub fn apply<T: Record>(items: &mut Vec<T>, mutation: Mutation<T>) -> AppResult<MirrorOutcome> {
    let outcome = match mutation {
        Mutation::Created(record) => {
            let id = require_id(&record)?.clone();
            match position(items, &id) {
                Some(index) => {
                    replace_at(items, index, record);
                    MirrorOutcome::Replaced(index)
                }
                None => {
                    items.push(record);
                    MirrorOutcome::Appended
                }
            }
        }
        Mutation::Updated(record) => {
            let id = require_id(&record)?.clone();
            match position(items, &id) {
                Some(index) => {
                    replace_at(items, index, record);
                    MirrorOutcome::Replaced(index)
                }
                None => MirrorOutcome::Missing,
            }
        }
        Mutation::Deleted(id) => {
            let before = items.len();
            items.retain(|item| item.id() != Some(&id));
            match before - items.len() {
                0 => MirrorOutcome::Missing,
                removed => MirrorOutcome::Removed(removed),
            }
        }
    };

    debug!(entity = T::ENTITY, ?outcome, "Mirrored mutation");
    Ok(outcome)
}

fn require_id<T: Record>(record: &T) -> AppResult<&RecordId> {
    record
        .id()
        .ok_or(AppError::MissingId { entity: T::ENTITY })
}

fn position<T: Record>(items: &[T], id: &RecordId) -> Option<usize> {
    items.iter().position(|item| item.id() == Some(id))
}

fn replace_at<T>(items: &mut [T], index: usize, record: T) {
    if let Some(slot) = items.get_mut(index) {
        *slot = record;
    }
}
