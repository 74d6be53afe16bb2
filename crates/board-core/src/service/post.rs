use std::sync::Arc;

use board_shared::dto::{PageResponse, PostSummary};

use super::{mapping::post_summary, member::resolve_member};
use crate::domain::{Post, PostId};
use crate::error::DomainError;
use crate::ports::{PageRequest, TransactionManager, TxMode};

/// Post use cases: list, read, create, update, delete.
///
/// Reads run in read-only transactions, writes in read-write ones. Each call
/// commits at most once; any error drops the open transaction, which rolls
/// it back.
#[derive(Clone)]
pub struct PostService {
    transactions: Arc<dyn TransactionManager>,
}

impl PostService {
    pub fn new(transactions: Arc<dyn TransactionManager>) -> Self {
        Self { transactions }
    }

    /// One page of posts, newest first. `page` is clamped to `>= 0` and
    /// `size` to `1..=50`.
    pub async fn list(
        &self,
        page: i64,
        size: i64,
    ) -> Result<PageResponse<PostSummary>, DomainError> {
        let request = PageRequest::clamped(page, size);

        let uow = self.transactions.begin(TxMode::ReadOnly).await?;
        let page = uow.posts().find_all_ordered_by_id_desc(request).await?;
        uow.commit().await?;

        let total_pages = page.total_pages();
        let items = page
            .items
            .iter()
            .map(post_summary)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResponse {
            items,
            page: request.page(),
            size: request.size(),
            total_elements: page.total_elements,
            total_pages,
        })
    }

    /// The post with its author and comments.
    pub async fn get_detail(&self, id: PostId) -> Result<Post, DomainError> {
        let uow = self.transactions.begin(TxMode::ReadOnly).await?;
        let found = uow.posts().find_detail_by_id(id).await?;
        uow.commit().await?;

        found.ok_or_else(|| DomainError::not_found("Post", id.get()))
    }

    /// Create a post and return its id.
    ///
    /// The author is looked up by nickname and created when unknown, so a
    /// second post by the same nickname shares the first one's member.
    pub async fn create(
        &self,
        title: String,
        content: String,
        nickname: String,
    ) -> Result<PostId, DomainError> {
        let uow = self.transactions.begin(TxMode::ReadWrite).await?;

        let author = resolve_member(uow.as_ref(), &nickname).await?;
        let post = Post::create(title, content, author)?;
        let id = uow.posts().save(post).await?.persisted_id()?;

        uow.commit().await?;
        tracing::info!(post_id = %id, "Post created");
        Ok(id)
    }

    /// Replace a post's title and content.
    pub async fn update(
        &self,
        id: PostId,
        title: String,
        content: String,
    ) -> Result<(), DomainError> {
        let uow = self.transactions.begin(TxMode::ReadWrite).await?;

        let found = uow.posts().find_by_id(id).await?;
        let Some(mut post) = found else {
            uow.rollback().await?;
            return Err(DomainError::not_found("Post", id.get()));
        };

        post.update(title, content)?;
        uow.posts().save(post).await?;

        uow.commit().await?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(())
    }

    /// Delete a post and, in the same transaction, every comment on it.
    pub async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        let uow = self.transactions.begin(TxMode::ReadWrite).await?;

        let found = uow.posts().find_by_id(id).await?;
        let Some(post) = found else {
            uow.rollback().await?;
            return Err(DomainError::not_found("Post", id.get()));
        };

        let removed = uow.comments().delete_all_by_post(id).await?;
        uow.posts().delete(post).await?;

        uow.commit().await?;
        tracing::info!(post_id = %id, comments_removed = removed, "Post deleted");
        Ok(())
    }
}
