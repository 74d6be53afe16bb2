use board_shared::validation::COMMENT_MAX_CHARS;
use chrono::{DateTime, Utc};

use super::{CommentId, Member, PostId, check_text};
use crate::error::DomainError;

/// Comment entity - a reply attached to exactly one post once bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    id: Option<CommentId>,
    content: String,
    author: Member,
    post_id: Option<PostId>,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment. It stays unbound until a post adopts it.
    pub fn create(content: impl Into<String>, author: Member) -> Result<Self, DomainError> {
        let content = content.into();
        check_text("content", &content, Some(COMMENT_MAX_CHARS))?;

        Ok(Self {
            id: None,
            content,
            author,
            post_id: None,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a comment from stored state.
    pub fn restore(
        id: CommentId,
        content: String,
        author: Member,
        post_id: Option<PostId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            content,
            author,
            post_id,
            created_at,
        }
    }

    pub fn id(&self) -> Option<CommentId> {
        self.id
    }

    pub fn persisted_id(&self) -> Result<CommentId, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Internal("comment has not been persisted".to_string()))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Member {
        &self.author
    }

    /// Back-reference to the owning post.
    pub fn post_id(&self) -> Option<PostId> {
        self.post_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Only `Post` moves comments in and out of its collection.
    pub(super) fn bind_post(&mut self, post_id: PostId) {
        self.post_id = Some(post_id);
    }

    pub(super) fn unbind_post(&mut self) {
        self.post_id = None;
    }
}
