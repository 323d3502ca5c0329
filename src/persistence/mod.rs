//! Persistence layer: the single owner of the backing-store handle.
//!
//! [`PersistenceGateway`] is the interface the features talk to. Two
//! implementations exist and are selected at startup:
//!
//! - [`PostgresGateway`] keeps one lazily opened PostgreSQL connection.
//! - [`MemoryGateway`] keeps an in-process document store, used for the
//!   document-store deployment and by the test suite.
//!
//! Every gateway caches its handle after the first successful `acquire`
//! and reuses it until `release` is called.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

pub use memory::MemoryGateway;
pub use models::{ContactMessage, ContactReceipt, NewContact, NewVisit, RecordId, VisitorEvent};
pub use postgres::PostgresGateway;

use crate::error::PortfolioError;

/// Shared, type-erased gateway handed to services and handlers.
pub type SharedGateway = Arc<dyn PersistenceGateway>;

/// Store primitives used by the contact and visitor features.
///
/// Each call obtains the cached handle internally, opening it on first
/// use. Failures to open it are [`PortfolioError::Connection`]; failed
/// statements are [`PortfolioError::Persistence`].
#[async_trait]
pub trait PersistenceGateway: Debug + Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Trivial round-trip proving the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be opened or the check query fails.
    async fn ping(&self) -> Result<(), PortfolioError>;

    /// Inserts one contact message and returns its id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be opened or the insert fails.
    async fn insert_contact(&self, contact: NewContact) -> Result<ContactReceipt, PortfolioError>;

    /// Lists all contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be opened or the query fails.
    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, PortfolioError>;

    /// Records one page view.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be opened or the insert fails.
    async fn insert_visit(&self, visit: NewVisit) -> Result<(), PortfolioError>;

    /// Total number of recorded page views.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be opened or the query fails.
    async fn count_visits(&self) -> Result<u64, PortfolioError>;

    /// Closes the cached handle, if any. Calling it twice is a no-op.
    async fn release(&self);
}
