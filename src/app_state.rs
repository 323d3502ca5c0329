//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::error::ErrorPolicy;
use crate::persistence::SharedGateway;
use crate::service::{ContactService, VisitorService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contact message feature.
    pub contacts: Arc<ContactService>,
    /// Page view feature.
    pub visitors: Arc<VisitorService>,
    /// Gateway, for the health check.
    pub gateway: SharedGateway,
    /// How much internal error detail reaches clients.
    pub errors: ErrorPolicy,
}

impl AppState {
    /// Wires both features to one gateway.
    #[must_use]
    pub fn new(gateway: SharedGateway, errors: ErrorPolicy) -> Self {
        Self {
            contacts: Arc::new(ContactService::new(Arc::clone(&gateway))),
            visitors: Arc::new(VisitorService::new(Arc::clone(&gateway))),
            gateway,
            errors,
        }
    }
}
