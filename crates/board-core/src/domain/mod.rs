//! Domain entities - the core business objects.

mod comment;
mod ids;
mod member;
mod post;

pub use comment::Comment;
pub use ids::{CommentId, MemberId, PostId};
pub use member::Member;
pub use post::Post;

use board_shared::validation::require_text;

use crate::error::DomainError;

fn check_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<(), DomainError> {
    require_text(field, value, max_chars).map_err(DomainError::Validation)
}
