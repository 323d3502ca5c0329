//! Visitor service: records page views and reports the total.

use crate::error::PortfolioError;
use crate::persistence::{NewVisit, SharedGateway};

/// Path recorded when the client does not name a page.
pub const DEFAULT_PAGE: &str = "/";

/// Recorded when the client address or user agent is unknown.
pub const UNKNOWN: &str = "unknown";

/// Longest stored path, in characters.
pub const MAX_PAGE_CHARS: usize = 255;

/// Longest stored client address, in characters (an IPv6 literal).
pub const MAX_IP_CHARS: usize = 45;

/// Longest stored user agent, in characters.
pub const MAX_USER_AGENT_CHARS: usize = 500;

/// Orchestrates persistence for page views. Every call to
/// [`track`](Self::track) writes exactly one event; there is no
/// deduplication.
#[derive(Debug, Clone)]
pub struct VisitorService {
    gateway: SharedGateway,
}

impl VisitorService {
    /// Creates a new `VisitorService`.
    #[must_use]
    pub fn new(gateway: SharedGateway) -> Self {
        Self { gateway }
    }

    /// Records one page view.
    ///
    /// # Errors
    ///
    /// Returns a connection or persistence error if the insert fails.
    pub async fn track(
        &self,
        page: Option<&str>,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), PortfolioError> {
        let visit = normalize_visit(page, ip_address, user_agent);
        tracing::debug!(page = %visit.page, ip = %visit.ip_address, "tracking visit");
        self.gateway.insert_visit(visit).await
    }

    /// Total number of recorded page views.
    ///
    /// # Errors
    ///
    /// Returns a connection or persistence error if the query fails.
    pub async fn count(&self) -> Result<u64, PortfolioError> {
        self.gateway.count_visits().await
    }
}

/// Applies defaults and column limits to raw request values.
#[must_use]
pub fn normalize_visit(
    page: Option<&str>,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
) -> NewVisit {
    NewVisit {
        page: truncate_chars(non_empty(page).unwrap_or(DEFAULT_PAGE), MAX_PAGE_CHARS),
        ip_address: truncate_chars(non_empty(ip_address).unwrap_or(UNKNOWN), MAX_IP_CHARS),
        user_agent: truncate_chars(non_empty(user_agent).unwrap_or(UNKNOWN), MAX_USER_AGENT_CHARS),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Keeps at most `max` characters, never splitting a code point.
fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
