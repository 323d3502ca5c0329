//! Service layer: one feature per entity.
//!
//! [`ContactService`] validates and stores contact messages;
//! [`VisitorService`] records page views. Both reach the store only
//! through the shared [`crate::persistence::PersistenceGateway`].

pub mod contact_service;
pub mod visitor_service;

pub use contact_service::ContactService;
pub use visitor_service::VisitorService;
