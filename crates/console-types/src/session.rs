//! Explicit per-session identity passed down to the pages that need it

use crate::error::{AppError, AppResult};
use crate::id::RecordId;
use serde::{Deserialize, Serialize};

/// Who is using the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator, sees every tenant
    #[default]
    Admin,
    /// Mentor scoped to their own enrollments
    Mentor,
}

/// Session context built once at startup
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Mentor identity read from browser storage, if any
    pub mentor_id: Option<RecordId>,
    /// Active role
    pub role: Role,
}

impl Session {
    /// Browser storage key holding the mentor identity
    pub const MENTOR_ID_KEY: &'static str = "mentorId";

    /// Administrator session without a mentor identity
    #[must_use]
    pub fn admin() -> Self {
        Self::default()
    }

    /// Mentor session
    pub fn mentor(id: impl Into<RecordId>) -> Self {
        Self {
            mentor_id: Some(id.into()),
            role: Role::Mentor,
        }
    }

    /// Build a session from the raw browser storage value
    ///
    /// Blank values are treated as absent.
    #[must_use]
    pub fn from_storage_value(value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()) {
            Some(id) if !id.is_empty() => Self::mentor(id),
            _ => Self::admin(),
        }
    }

    /// Mentor identity, required by mentor-scoped endpoints
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingSessionValue`] when no mentor is signed in.
    pub fn require_mentor(&self) -> AppResult<&RecordId> {
        self.mentor_id
            .as_ref()
            .ok_or(AppError::MissingSessionValue(Self::MENTOR_ID_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_storage_value_builds_mentor_session() {
        let session = Session::from_storage_value(Some(" m-17 ".to_string()));
        assert_eq!(session.role, Role::Mentor);
        assert_eq!(session.mentor_id, Some(RecordId::new("m-17")));
    }

    #[test]
    fn test_blank_storage_value_is_admin() {
        assert_eq!(Session::from_storage_value(Some("   ".into())), Session::admin());
        assert_eq!(Session::from_storage_value(None), Session::admin());
    }

    #[test]
    fn test_require_mentor() {
        assert!(Session::admin().require_mentor().is_err());
        assert_eq!(
            Session::mentor("7").require_mentor().ok(),
            Some(&RecordId::new("7"))
        );
    }
}
