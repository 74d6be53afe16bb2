//! Entity to DTO mapping.

use board_shared::dto::{CommentResponse, PostDetail, PostSummary};

use crate::domain::{Comment, Post};
use crate::error::DomainError;

pub fn post_summary(post: &Post) -> Result<PostSummary, DomainError> {
    Ok(PostSummary {
        id: post.persisted_id()?.get(),
        title: post.title().to_string(),
        content: post.content().to_string(),
        author_nickname: post.author().nickname().to_string(),
        comment_count: post.comment_count(),
    })
}

pub fn comment_response(comment: &Comment) -> Result<CommentResponse, DomainError> {
    Ok(CommentResponse {
        id: comment.persisted_id()?.get(),
        content: comment.content().to_string(),
        author_nickname: comment.author().nickname().to_string(),
        created_at: comment.created_at().to_rfc3339(),
    })
}

pub fn post_detail(post: &Post) -> Result<PostDetail, DomainError> {
    Ok(PostDetail {
        id: post.persisted_id()?.get(),
        title: post.title().to_string(),
        content: post.content().to_string(),
        author_nickname: post.author().nickname().to_string(),
        created_at: post.created_at().to_rfc3339(),
        updated_at: post.updated_at().to_rfc3339(),
        comments: post
            .comments()
            .iter()
            .map(comment_response)
            .collect::<Result<_, _>>()?,
    })
}
