//! Field limits and request validation.
//!
//! Requests are validated at the edge, before any service code runs. The
//! domain factories check the same limits again through [`require_text`].

use thiserror::Error;

use crate::dto::{CommentCreateRequest, PostCreateRequest, PostUpdateRequest};

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum length of a member nickname, in characters.
pub const NICKNAME_MAX_CHARS: usize = 50;

/// Maximum length of a comment body, in characters.
pub const COMMENT_MAX_CHARS: usize = 1000;

/// One or more field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Check that `value` is not blank and, when `max_chars` is given, not longer
/// than that many characters.
pub fn require_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be blank"));
    }
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            return Err(format!("{field} must be at most {max} characters"));
        }
    }
    Ok(())
}

/// Implemented by request bodies that carry user input.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn collect(checks: impl IntoIterator<Item = Result<(), String>>) -> Result<(), ValidationErrors> {
    let errors: Vec<String> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

impl Validate for PostCreateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect([
            require_text("title", &self.title, Some(TITLE_MAX_CHARS)),
            require_text("content", &self.content, None),
            require_text("nickname", &self.nickname, Some(NICKNAME_MAX_CHARS)),
        ])
    }
}

impl Validate for PostUpdateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect([
            require_text("title", &self.title, Some(TITLE_MAX_CHARS)),
            require_text("content", &self.content, None),
        ])
    }
}

impl Validate for CommentCreateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect([
            require_text("content", &self.content, Some(COMMENT_MAX_CHARS)),
            require_text("nickname", &self.nickname, Some(NICKNAME_MAX_CHARS)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> PostCreateRequest {
        PostCreateRequest {
            title: title.to_string(),
            content: "body".to_string(),
            nickname: "alice".to_string(),
        }
    }

    #[test]
    fn test_title_length_boundary() {
        assert!(post(&"a".repeat(200)).validate().is_ok());

        let err = post(&"a".repeat(201)).validate().unwrap_err();
        assert_eq!(err.messages(), ["title must be at most 200 characters"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(post(&"가".repeat(200)).validate().is_ok());
    }

    #[test]
    fn test_blank_fields_are_collected() {
        let req = CommentCreateRequest {
            content: "   ".to_string(),
            nickname: String::new(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.messages().len(), 2);
        assert_eq!(
            err.to_string(),
            "content must not be blank, nickname must not be blank"
        );
    }

    #[test]
    fn test_comment_limit() {
        let req = CommentCreateRequest {
            content: "x".repeat(COMMENT_MAX_CHARS + 1),
            nickname: "bob".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
