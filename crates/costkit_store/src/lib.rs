//! # costkit_store
//!
//! Persistence for costkit.
//!
//! - **Catalog loading**: YAML, JSON or TOML catalog rows validated into a
//!   [`PricingCatalog`](costkit_core::PricingCatalog)
//! - **Session storage**: discovery snapshots keyed by session id, on disk or
//!   in memory
//! - **Driver**: a conversation that is saved before it advances

pub mod catalog_loader;
pub mod document;
pub mod driver;
pub mod error;
pub mod session_store;

pub use catalog_loader::CatalogLoader;
pub use document::{read_document, write_document, DocumentFormat};
pub use driver::DiscoveryDriver;
pub use error::{StoreError, StoreResult};
pub use session_store::{
    validate_session_id, CapturedCall, FileSessionStore, MemorySessionStore, SessionId,
    SessionStore, SessionSummary, StoredSession,
};
