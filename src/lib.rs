//! # portfolio-backend
//!
//! HTTP/JSON backend for a personal portfolio site: a contact form, a
//! page-view counter and a health check.
//!
//! Every operation maps one request to one parameterized store statement.
//! The store is reached through a single cached handle owned by the
//! persistence gateway.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Validation (validation.rs)
//!     ├── ContactService / VisitorService (service/)
//!     │
//!     └── PersistenceGateway (persistence/)
//!             ├── PostgreSQL
//!             └── in-process document store
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
pub mod service;
pub mod telemetry;
pub mod validation;
