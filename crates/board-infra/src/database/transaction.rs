//! Units of work backed by SeaORM transactions.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseTransaction, DbConn, TransactionTrait};

use board_core::error::RepoError;
use board_core::ports::{
    CommentRepository, MemberRepository, PostRepository, TransactionManager, TxMode, UnitOfWork,
};

use super::postgres_base::map_db_err;
use super::postgres_repo::{
    PostgresCommentRepository, PostgresMemberRepository, PostgresPostRepository,
};

/// Opens a database transaction per unit of work.
#[derive(Clone)]
pub struct SeaTransactionManager {
    db: Arc<DbConn>,
}

impl SeaTransactionManager {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionManager for SeaTransactionManager {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn UnitOfWork>, RepoError> {
        let access = match mode {
            TxMode::ReadOnly => AccessMode::ReadOnly,
            TxMode::ReadWrite => AccessMode::ReadWrite,
        };

        let txn = self
            .db
            .begin_with_config(None, Some(access))
            .await
            .map_err(map_db_err)?;

        Ok(Box::new(SeaUnitOfWork { txn }))
    }
}

/// An open `DatabaseTransaction`. SeaORM rolls it back if dropped uncommitted.
pub struct SeaUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl UnitOfWork for SeaUnitOfWork {
    fn posts(&self) -> Box<dyn PostRepository + '_> {
        Box::new(PostgresPostRepository::new(&self.txn))
    }

    fn comments(&self) -> Box<dyn CommentRepository + '_> {
        Box::new(PostgresCommentRepository::new(&self.txn))
    }

    fn members(&self) -> Box<dyn MemberRepository + '_> {
        Box::new(PostgresMemberRepository::new(&self.txn))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        self.txn.rollback().await.map_err(map_db_err)
    }
}
