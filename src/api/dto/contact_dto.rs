//! Contact form DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{ContactMessage, RecordId};

/// Request body for `POST /api/contact`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a decoding failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ContactRequest {
    /// Sender name.
    #[serde(default)]
    pub name: Option<String>,
    /// Sender email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Message body.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /api/contact`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactCreatedResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation shown to the sender.
    pub message: String,
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /api/messages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageListResponse {
    /// Number of messages returned.
    pub total: usize,
    /// Messages, newest first.
    pub messages: Vec<ContactMessage>,
}
