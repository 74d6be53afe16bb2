//! In-memory store - used when no database is configured, and in tests.
//!
//! Same semantics as the PostgreSQL store: store-assigned ids, unique
//! nicknames, foreign keys checked on write, all-or-nothing commits.
//! Note: Data is lost on process restart.

mod repositories;
mod store;

pub use repositories::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryPostRepository,
};
pub use store::{InMemoryStore, InMemoryUnitOfWork, StoreStats};
