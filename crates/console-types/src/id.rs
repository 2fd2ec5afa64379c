//! Record identity keys

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identity key of a remote record
///
/// Backends disagree on id types: document stores hand out `_id` strings,
/// relational ones hand out integers. Both deserialize into the same opaque
/// string so list keys, edit targets and delete targets compare uniformly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an id value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_and_numeric_ids_deserialize() {
        let text: RecordId = serde_json::from_str(r#""65f1c0ab""#).unwrap();
        let number: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(text.as_str(), "65f1c0ab");
        assert_eq!(number, RecordId::from(42_u64));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RecordId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    }

    #[test]
    fn test_rejects_non_scalar() {
        assert!(serde_json::from_str::<RecordId>("[1]").is_err());
    }
}
