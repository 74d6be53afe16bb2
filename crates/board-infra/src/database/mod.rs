//! Database connection management and the SeaORM-backed store.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;
#[cfg(feature = "postgres")]
mod transaction;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::BoardDatabase;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCommentRepository, PostgresMemberRepository, PostgresPostRepository,
};
#[cfg(feature = "postgres")]
pub use transaction::{SeaTransactionManager, SeaUnitOfWork};
