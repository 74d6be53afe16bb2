use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use board_core::domain::{Comment, CommentId, Member, MemberId, Post, PostId};
use board_core::error::RepoError;
use board_core::ports::{
    CommentRepository, MemberRepository, PostRepository, TransactionManager, TxMode, UnitOfWork,
};

use super::repositories::{
    InMemoryCommentRepository, InMemoryMemberRepository, InMemoryPostRepository,
};

#[derive(Debug, Clone)]
pub(super) struct MemberRow {
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(super) struct PostRow {
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(super) struct CommentRow {
    pub content: String,
    pub author_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

/// The three board tables plus their id sequences.
#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    pub members: BTreeMap<i64, MemberRow>,
    pub posts: BTreeMap<i64, PostRow>,
    pub comments: BTreeMap<i64, CommentRow>,
    last_member_id: i64,
    last_post_id: i64,
    last_comment_id: i64,
}

impl Tables {
    pub fn next_member_id(&mut self) -> i64 {
        self.last_member_id += 1;
        self.last_member_id
    }

    pub fn next_post_id(&mut self) -> i64 {
        self.last_post_id += 1;
        self.last_post_id
    }

    pub fn next_comment_id(&mut self) -> i64 {
        self.last_comment_id += 1;
        self.last_comment_id
    }

    pub fn member(&self, id: i64) -> Result<Member, RepoError> {
        let row = self
            .members
            .get(&id)
            .ok_or_else(|| RepoError::Query(format!("member {id} does not exist")))?;

        Ok(Member::restore(
            MemberId(id),
            row.nickname.clone(),
            row.created_at,
            row.updated_at,
        ))
    }

    pub fn comment(&self, id: i64, row: &CommentRow) -> Result<Comment, RepoError> {
        Ok(Comment::restore(
            CommentId(id),
            row.content.clone(),
            self.member(row.author_id)?,
            Some(PostId(row.post_id)),
            row.created_at,
        ))
    }

    pub fn post(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let Some(row) = self.posts.get(&id) else {
            return Ok(None);
        };

        let comments = self
            .comments
            .iter()
            .filter(|(_, comment)| comment.post_id == id)
            .map(|(comment_id, comment)| self.comment(*comment_id, comment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Post::restore(
            PostId(id),
            row.title.clone(),
            row.content.clone(),
            self.member(row.author_id)?,
            row.created_at,
            row.updated_at,
            comments,
        )))
    }

    pub fn nickname_taken(&self, nickname: &str, except: Option<i64>) -> bool {
        self.members
            .iter()
            .any(|(id, row)| row.nickname == nickname && Some(*id) != except)
    }
}

/// Row counts of the committed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub members: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Process-local board store.
///
/// A unit of work holds the store lock until it commits or is dropped, so
/// transactions run one at a time and never observe each other's writes.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<AsyncMutex<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts of committed rows. Waits for any open unit of work to finish.
    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.lock().await;
        StoreStats {
            members: tables.members.len(),
            posts: tables.posts.len(),
            comments: tables.comments.len(),
        }
    }

    async fn open(&self, mode: TxMode) -> InMemoryUnitOfWork {
        let committed = Arc::clone(&self.tables).lock_owned().await;
        let working = match mode {
            TxMode::ReadOnly => None,
            TxMode::ReadWrite => Some(Mutex::new(committed.clone())),
        };

        InMemoryUnitOfWork { committed, working }
    }
}

#[async_trait]
impl TransactionManager for InMemoryStore {
    async fn begin(&self, mode: TxMode) -> Result<Box<dyn UnitOfWork>, RepoError> {
        Ok(Box::new(self.open(mode).await))
    }
}

/// Holds the store lock for its lifetime. Read-write units change a private
/// copy of the tables that replaces the committed ones on commit; read-only
/// units read the committed tables in place.
pub struct InMemoryUnitOfWork {
    committed: OwnedMutexGuard<Tables>,
    working: Option<Mutex<Tables>>,
}

fn poisoned() -> RepoError {
    RepoError::Query("in-memory store lock poisoned".to_string())
}

impl InMemoryUnitOfWork {
    pub(super) fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> Result<R, RepoError> {
        match &self.working {
            Some(working) => {
                let tables = working.lock().map_err(|_| poisoned())?;
                Ok(f(&tables))
            }
            None => Ok(f(&self.committed)),
        }
    }

    pub(super) fn write<R>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<R, RepoError>,
    ) -> Result<R, RepoError> {
        let Some(working) = &self.working else {
            return Err(RepoError::ReadOnly);
        };
        let mut tables = working.lock().map_err(|_| poisoned())?;
        f(&mut tables)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn posts(&self) -> Box<dyn PostRepository + '_> {
        Box::new(InMemoryPostRepository::new(self))
    }

    fn comments(&self) -> Box<dyn CommentRepository + '_> {
        Box::new(InMemoryCommentRepository::new(self))
    }

    fn members(&self) -> Box<dyn MemberRepository + '_> {
        Box::new(InMemoryMemberRepository::new(self))
    }

    async fn commit(self: Box<Self>) -> Result<(), RepoError> {
        let Self {
            mut committed,
            working,
        } = *self;

        if let Some(working) = working {
            *committed = working.into_inner().map_err(|_| poisoned())?;
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepoError> {
        Ok(())
    }
}
