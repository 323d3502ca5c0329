//! Records written to and read from the backing store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned identifier.
///
/// The SQL backend hands out serial integers, the document backend string
/// keys. Serialized untagged so clients see a plain number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecordId {
    /// Auto-increment row ID.
    Serial(i64),
    /// Opaque document key.
    Key(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial(id) => write!(f, "{id}"),
            Self::Key(key) => f.write_str(key),
        }
    }
}

/// A validated contact submission, trimmed and ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
}

/// What the store returns after inserting a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A stored row from the contact messages collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactMessage {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A normalized page view, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    /// Visited path.
    pub page: String,
    /// Best-effort client address.
    pub ip_address: String,
    /// Client user agent, already truncated.
    pub user_agent: String,
}

/// A stored page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorEvent {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Visited path.
    pub page: String,
    /// Best-effort client address.
    pub ip_address: String,
    /// Client user agent.
    pub user_agent: String,
    /// Server-side visit timestamp.
    pub visited_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_serializes_untagged() {
        let serial = serde_json::to_value(RecordId::Serial(42)).ok();
        let key = serde_json::to_value(RecordId::Key("abc".to_string())).ok();
        assert_eq!(serial, Some(serde_json::json!(42)));
        assert_eq!(key, Some(serde_json::json!("abc")));
    }

    #[test]
    fn record_id_display() {
        assert_eq!(RecordId::Serial(7).to_string(), "7");
        assert_eq!(RecordId::Key("doc-1".to_string()).to_string(), "doc-1");
    }
}
