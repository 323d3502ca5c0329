//! Visitor tracking DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/visitors`. The body itself may be empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VisitRequest {
    /// Visited path; `/` when absent.
    #[serde(default)]
    pub page: Option<String>,
}

/// Response body for `POST /api/visitors`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitTrackedResponse {
    /// Always `true`.
    pub success: bool,
}

/// Response body for `GET /api/visitors/count`.
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitorCountResponse {
    /// Total number of recorded page views.
    pub total: u64,
}
