//! Application services - one transaction per board operation.

mod comment;
mod mapping;
mod member;
mod post;

pub use comment::CommentService;
pub use mapping::{comment_response, post_detail, post_summary};
pub use member::resolve_member;
pub use post::PostService;
