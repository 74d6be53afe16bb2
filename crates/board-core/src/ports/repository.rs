use async_trait::async_trait;

use super::{Page, PageRequest};
use crate::domain::{Comment, CommentId, Member, MemberId, Post, PostId};
use crate::error::RepoError;

/// Lookup and persistence shared by every repository.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert the entity when it has no id yet, update it otherwise.
    /// Returns the stored entity with its id assigned.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Member repository.
#[async_trait]
pub trait MemberRepository: BaseRepository<Member, MemberId> {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Member>, RepoError>;
}

/// Post repository. Posts are always returned with their author and comments.
///
/// `save` writes the post row only; comments are persisted through
/// [`CommentRepository`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Newest posts first, authors and comments loaded in batch.
    async fn find_all_ordered_by_id_desc(
        &self,
        request: PageRequest,
    ) -> Result<Page<Post>, RepoError>;

    /// The post with its author, every comment and each comment's author.
    async fn find_detail_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    async fn delete(&self, post: Post) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, CommentId> {
    async fn delete(&self, comment: Comment) -> Result<(), RepoError>;

    /// Delete every comment bound to `post_id`, returning how many went.
    async fn delete_all_by_post(&self, post_id: PostId) -> Result<u64, RepoError>;
}
