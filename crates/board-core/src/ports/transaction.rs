//! Transaction ports.
//!
//! Every service operation runs inside exactly one [`UnitOfWork`]. Repository
//! views handed out by a unit of work read and write through its transaction.
//! Dropping a unit of work without calling `commit` discards its writes.

use async_trait::async_trait;

use super::{CommentRepository, MemberRepository, PostRepository};
use crate::error::RepoError;

/// Access mode of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

/// Opens units of work against the data store.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn UnitOfWork>, RepoError>;
}

/// An open transaction and the repositories bound to it.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn posts(&self) -> Box<dyn PostRepository + '_>;

    fn comments(&self) -> Box<dyn CommentRepository + '_>;

    fn members(&self) -> Box<dyn MemberRepository + '_>;

    async fn commit(self: Box<Self>) -> Result<(), RepoError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepoError>;
}
