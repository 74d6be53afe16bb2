use board_shared::validation::TITLE_MAX_CHARS;
use chrono::{DateTime, Utc};

use super::{Comment, CommentId, Member, PostId, check_text};
use crate::error::DomainError;

/// Post entity - a board post and the comments it owns.
///
/// The comment collection is only reachable as a slice. `add_comment` and
/// `remove_comment` are the only ways to change it, and they keep every
/// comment's back-reference pointing at this post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    id: Option<PostId>,
    title: String,
    content: String,
    author: Member,
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with no comments.
    pub fn create(
        title: impl Into<String>,
        content: impl Into<String>,
        author: Member,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let content = content.into();
        validate(&title, &content)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            title,
            content,
            author,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a post from stored state. Comments are re-bound to `id`.
    pub fn restore(
        id: PostId,
        title: String,
        content: String,
        author: Member,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        comments: Vec<Comment>,
    ) -> Self {
        let comments = comments
            .into_iter()
            .map(|mut comment| {
                comment.bind_post(id);
                comment
            })
            .collect();

        Self {
            id: Some(id),
            title,
            content,
            author,
            comments,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn persisted_id(&self) -> Result<PostId, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Internal("post has not been persisted".to_string()))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &Member {
        &self.author
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace title and content and re-stamp `updated_at`.
    pub fn update(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        let title = title.into();
        let content = content.into();
        validate(&title, &content)?;

        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Adopt `comment` and point its back-reference at this post.
    ///
    /// The post must already be persisted, since the back-reference is its id.
    pub fn add_comment(&mut self, mut comment: Comment) -> Result<&Comment, DomainError> {
        let Some(post_id) = self.id else {
            return Err(DomainError::Business(
                "cannot attach a comment to a post that has not been saved".to_string(),
            ));
        };

        comment.bind_post(post_id);
        self.comments.push(comment);
        Ok(&self.comments[self.comments.len() - 1])
    }

    /// Detach the comment with `comment_id`, returning it unbound.
    ///
    /// The returned comment is an orphan; the caller is expected to delete it.
    pub fn remove_comment(&mut self, comment_id: CommentId) -> Option<Comment> {
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id() == Some(comment_id))?;

        let mut comment = self.comments.remove(index);
        comment.unbind_post();
        Some(comment)
    }
}

fn validate(title: &str, content: &str) -> Result<(), DomainError> {
    check_text("title", title, Some(TITLE_MAX_CHARS))?;
    check_text("content", content, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberId;

    fn member(id: i64, nickname: &str) -> Member {
        let now = Utc::now();
        Member::restore(MemberId(id), nickname.to_string(), now, now)
    }

    fn saved_post(id: i64) -> Post {
        let now = Utc::now();
        Post::restore(
            PostId(id),
            "Hello".to_string(),
            "World".to_string(),
            member(1, "alice"),
            now,
            now,
            Vec::new(),
        )
    }

    fn saved_comment(id: i64, post_id: Option<PostId>) -> Comment {
        Comment::restore(
            CommentId(id),
            "Nice!".to_string(),
            member(2, "bob"),
            post_id,
            Utc::now(),
        )
    }

    #[test]
    fn test_create_validates_title() {
        let author = member(1, "alice");
        assert!(Post::create("t".repeat(TITLE_MAX_CHARS), "c", author.clone()).is_ok());
        assert!(matches!(
            Post::create("t".repeat(TITLE_MAX_CHARS + 1), "c", author.clone()),
            Err(DomainError::Validation(_))
        ));
        assert!(Post::create("title", " ", author).is_err());
    }

    #[test]
    fn test_update_restamps_updated_at() {
        let mut post = saved_post(1);
        let created_at = post.created_at();
        let before = post.updated_at();

        post.update("Hello again", "Changed").unwrap();

        assert_eq!(post.title(), "Hello again");
        assert_eq!(post.content(), "Changed");
        assert_eq!(post.created_at(), created_at);
        assert!(post.updated_at() >= before);
    }

    #[test]
    fn test_failed_update_leaves_post_untouched() {
        let mut post = saved_post(1);
        assert!(post.update("", "Changed").is_err());
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.content(), "World");
    }

    #[test]
    fn test_add_comment_binds_back_reference() {
        let mut post = saved_post(7);
        let comment = Comment::create("Nice!", member(2, "bob")).unwrap();

        let attached = post.add_comment(comment).unwrap();
        assert_eq!(attached.post_id(), Some(PostId(7)));
        assert_eq!(post.comment_count(), 1);
        assert!(post.comments().iter().all(|c| c.post_id() == post.id()));
    }

    #[test]
    fn test_add_comment_to_unsaved_post_fails() {
        let mut post = Post::create("Hello", "World", member(1, "alice")).unwrap();
        let comment = Comment::create("Nice!", member(2, "bob")).unwrap();

        assert!(matches!(
            post.add_comment(comment),
            Err(DomainError::Business(_))
        ));
        assert!(post.comments().is_empty());
    }

    #[test]
    fn test_remove_comment_unbinds() {
        let now = Utc::now();
        let mut post = Post::restore(
            PostId(3),
            "Hello".to_string(),
            "World".to_string(),
            member(1, "alice"),
            now,
            now,
            vec![saved_comment(10, None), saved_comment(11, None)],
        );
        assert!(post.comments().iter().all(|c| c.post_id() == Some(PostId(3))));

        let orphan = post.remove_comment(CommentId(10)).unwrap();
        assert_eq!(orphan.post_id(), None);
        assert_eq!(post.comment_count(), 1);
        assert_eq!(post.comments()[0].id(), Some(CommentId(11)));

        assert!(post.remove_comment(CommentId(10)).is_none());
    }
}
