//! # Board Infrastructure
//!
//! Concrete implementations of the ports defined in `board-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//!
//! The in-memory store is always available. It backs the server when no
//! database is configured and the service-level tests.

pub mod database;
pub mod memory;

pub use memory::{InMemoryStore, StoreStats};

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{BoardDatabase, SeaTransactionManager};
