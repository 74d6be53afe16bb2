use std::sync::Arc;

use super::member::resolve_member;
use crate::domain::{Comment, CommentId, PostId};
use crate::error::DomainError;
use crate::ports::{TransactionManager, TxMode};

/// Comment use cases.
#[derive(Clone)]
pub struct CommentService {
    transactions: Arc<dyn TransactionManager>,
}

impl CommentService {
    pub fn new(transactions: Arc<dyn TransactionManager>) -> Self {
        Self { transactions }
    }

    /// Add a comment to a post and return the comment's id.
    ///
    /// Side effect: an unknown `nickname` creates a new member. The post is
    /// checked first, so a missing post creates neither member nor comment.
    pub async fn add(
        &self,
        post_id: PostId,
        content: String,
        nickname: String,
    ) -> Result<CommentId, DomainError> {
        let uow = self.transactions.begin(TxMode::ReadWrite).await?;

        let found = uow.posts().find_by_id(post_id).await?;
        let Some(mut post) = found else {
            uow.rollback().await?;
            return Err(DomainError::not_found("Post", post_id.get()));
        };

        let author = resolve_member(uow.as_ref(), &nickname).await?;
        let comment = Comment::create(content, author)?;
        let attached = post.add_comment(comment)?.clone();
        let id = uow.comments().save(attached).await?.persisted_id()?;

        uow.commit().await?;
        tracing::info!(post_id = %post_id, comment_id = %id, "Comment added");
        Ok(id)
    }

    /// Detach a comment from its post and delete it.
    pub async fn remove(&self, post_id: PostId, comment_id: CommentId) -> Result<(), DomainError> {
        let uow = self.transactions.begin(TxMode::ReadWrite).await?;

        let found = uow.posts().find_by_id(post_id).await?;
        let Some(mut post) = found else {
            uow.rollback().await?;
            return Err(DomainError::not_found("Post", post_id.get()));
        };

        let Some(orphan) = post.remove_comment(comment_id) else {
            uow.rollback().await?;
            return Err(DomainError::not_found("Comment", comment_id.get()));
        };
        uow.comments().delete(orphan).await?;

        uow.commit().await?;
        tracing::info!(post_id = %post_id, comment_id = %comment_id, "Comment removed");
        Ok(())
    }
}
