//! In-process document store implementation of the persistence layer.
//!
//! Documents live in two collections keyed by UUID strings, mirroring a
//! managed document database. The [`DocumentStore`] plays the remote
//! database and outlives any client handle: releasing the gateway drops
//! the handle, not the data.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::PersistenceGateway;
use super::models::{ContactMessage, ContactReceipt, NewContact, NewVisit, RecordId, VisitorEvent};
use crate::error::PortfolioError;

/// Collections backing the memory gateway.
#[derive(Debug, Default)]
pub struct DocumentStore {
    contacts: Mutex<Vec<ContactMessage>>,
    visitors: Mutex<Vec<VisitorEvent>>,
}

impl DocumentStore {
    async fn add_contact(&self, contact: NewContact) -> ContactReceipt {
        let mut contacts = self.contacts.lock().await;
        // Timestamps never go backwards, even if the wall clock does.
        let now = Utc::now();
        let created_at = contacts
            .last()
            .map_or(now, |last| last.created_at.max(now));
        let id = RecordId::Key(Uuid::new_v4().to_string());
        contacts.push(ContactMessage {
            id: id.clone(),
            name: contact.name,
            email: contact.email,
            message: contact.message,
            created_at,
        });
        ContactReceipt { id, created_at }
    }

    async fn contacts_newest_first(&self) -> Vec<ContactMessage> {
        let contacts = self.contacts.lock().await;
        let mut ordered: Vec<ContactMessage> = contacts.iter().rev().cloned().collect();
        // Stable sort: equal timestamps keep later insertions first.
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ordered
    }

    async fn add_visit(&self, visit: NewVisit) {
        self.visitors.lock().await.push(VisitorEvent {
            id: RecordId::Key(Uuid::new_v4().to_string()),
            page: visit.page,
            ip_address: visit.ip_address,
            user_agent: visit.user_agent,
            visited_at: Utc::now(),
        });
    }
}

/// Memory-backed gateway with the same handle lifecycle as the SQL one.
#[derive(Debug)]
pub struct MemoryGateway {
    store: Arc<DocumentStore>,
    handle: RwLock<Option<Arc<DocumentStore>>>,
    reachable: bool,
    opened: AtomicUsize,
}

impl MemoryGateway {
    /// Creates a gateway over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(DocumentStore::default()),
            handle: RwLock::new(None),
            reachable: true,
            opened: AtomicUsize::new(0),
        }
    }

    /// Creates a gateway whose store can never be reached. Every
    /// operation fails with [`PortfolioError::Connection`].
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Returns the cached handle, opening it on first use.
    ///
    /// Concurrent first callers are serialized on the write lock; only
    /// the first one opens a handle, the rest reuse it.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Connection`] if the store is unreachable.
    pub async fn acquire(&self) -> Result<Arc<DocumentStore>, PortfolioError> {
        if let Some(handle) = self.handle.read().await.as_ref() {
            return Ok(Arc::clone(handle));
        }

        let mut slot = self.handle.write().await;
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }
        if !self.reachable {
            return Err(PortfolioError::Connection(
                "document store unreachable".to_string(),
            ));
        }

        let handle = Arc::clone(&self.store);
        *slot = Some(Arc::clone(&handle));
        self.opened.fetch_add(1, Ordering::Relaxed);
        tracing::info!(backend = "memory", "document store client opened");
        Ok(handle)
    }

    /// Whether a handle is currently cached.
    pub async fn is_connected(&self) -> bool {
        self.handle.read().await.is_some()
    }

    /// Number of times a handle has been opened over the gateway's life.
    #[must_use]
    pub fn connections_opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    /// Snapshot of every recorded page view, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Connection`] if the store is unreachable.
    pub async fn visits(&self) -> Result<Vec<VisitorEvent>, PortfolioError> {
        let store = self.acquire().await?;
        let visits = store.visitors.lock().await.clone();
        Ok(visits)
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), PortfolioError> {
        self.acquire().await.map(|_| ())
    }

    async fn insert_contact(&self, contact: NewContact) -> Result<ContactReceipt, PortfolioError> {
        let store = self.acquire().await?;
        Ok(store.add_contact(contact).await)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactMessage>, PortfolioError> {
        let store = self.acquire().await?;
        Ok(store.contacts_newest_first().await)
    }

    async fn insert_visit(&self, visit: NewVisit) -> Result<(), PortfolioError> {
        let store = self.acquire().await?;
        store.add_visit(visit).await;
        Ok(())
    }

    async fn count_visits(&self) -> Result<u64, PortfolioError> {
        let store = self.acquire().await?;
        let total = store.visitors.lock().await.len();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn release(&self) {
        if self.handle.write().await.take().is_some() {
            tracing::info!(backend = "memory", "document store client closed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn contact(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            message: "hello".to_string(),
        }
    }

    fn visit(page: &str) -> NewVisit {
        NewVisit {
            page: page.to_string(),
            ip_address: "127.0.0.1".to_string(),
            user_agent: "test".to_string(),
        }
    }

    #[test]
    fn names_its_backend_without_connecting() {
        let gateway: crate::persistence::SharedGateway = Arc::new(MemoryGateway::unreachable());
        assert_eq!(gateway.backend(), "memory");
    }

    #[tokio::test]
    async fn acquire_is_lazy_and_idempotent() {
        let gateway = MemoryGateway::new();
        assert!(!gateway.is_connected().await);
        assert_eq!(gateway.connections_opened(), 0);

        assert!(gateway.acquire().await.is_ok());
        assert!(gateway.acquire().await.is_ok());
        assert!(gateway.is_connected().await);
        assert_eq!(gateway.connections_opened(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_acquire_opens_once() {
        let gateway = Arc::new(MemoryGateway::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let gw = Arc::clone(&gateway);
            tasks.push(tokio::spawn(async move { gw.acquire().await.is_ok() }));
        }
        for task in tasks {
            let Ok(ok) = task.await else {
                panic!("acquire task panicked");
            };
            assert!(ok);
        }
        assert_eq!(gateway.connections_opened(), 1);
    }

    #[tokio::test]
    async fn release_is_idempotent_and_keeps_data() {
        let gateway = MemoryGateway::new();
        gateway.release().await;

        assert!(gateway.insert_visit(visit("/")).await.is_ok());
        gateway.release().await;
        gateway.release().await;
        assert!(!gateway.is_connected().await);

        let Ok(total) = gateway.count_visits().await else {
            panic!("count failed");
        };
        assert_eq!(total, 1);
        assert_eq!(gateway.connections_opened(), 2);
    }

    #[tokio::test]
    async fn unreachable_store_fails_with_connection_error() {
        let gateway = MemoryGateway::unreachable();
        assert!(matches!(
            gateway.ping().await,
            Err(PortfolioError::Connection(_))
        ));
        assert!(matches!(
            gateway.insert_contact(contact("ann")).await,
            Err(PortfolioError::Connection(_))
        ));
        assert!(!gateway.is_connected().await);
    }

    #[tokio::test]
    async fn contacts_listed_newest_first() {
        let gateway = MemoryGateway::new();
        for name in ["a", "b", "c", "d"] {
            assert!(gateway.insert_contact(contact(name)).await.is_ok());
        }
        let Ok(list) = gateway.list_contacts().await else {
            panic!("list failed");
        };
        let names: Vec<&str> = list.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["d", "c", "b", "a"]);
        assert!(list.windows(2).all(|w| match w {
            [newer, older] => newer.created_at >= older.created_at,
            _ => true,
        }));
    }

    #[tokio::test]
    async fn contact_ids_are_distinct_keys() {
        let gateway = MemoryGateway::new();
        let Ok(first) = gateway.insert_contact(contact("a")).await else {
            panic!("insert failed");
        };
        let Ok(second) = gateway.insert_contact(contact("b")).await else {
            panic!("insert failed");
        };
        assert_ne!(first.id, second.id);
        assert!(matches!(first.id, RecordId::Key(_)));
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let gateway = MemoryGateway::new();
        assert!(matches!(gateway.count_visits().await, Ok(0)));
        for page in ["/", "/about", "/"] {
            assert!(gateway.insert_visit(visit(page)).await.is_ok());
        }
        assert!(matches!(gateway.count_visits().await, Ok(3)));

        let Ok(visits) = gateway.visits().await else {
            panic!("visits failed");
        };
        let pages: Vec<&str> = visits.iter().map(|v| v.page.as_str()).collect();
        assert_eq!(pages, ["/", "/about", "/"]);
    }
}
