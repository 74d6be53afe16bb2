use board_shared::validation::NICKNAME_MAX_CHARS;
use chrono::{DateTime, Utc};

use super::{MemberId, check_text};
use crate::error::DomainError;

/// Member entity - someone who writes posts or comments, known only by nickname.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    id: Option<MemberId>,
    nickname: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new, not yet persisted member.
    pub fn create(nickname: impl Into<String>) -> Result<Self, DomainError> {
        let nickname = nickname.into();
        check_text("nickname", &nickname, Some(NICKNAME_MAX_CHARS))?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            nickname,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a member from stored state.
    pub fn restore(
        id: MemberId,
        nickname: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            nickname,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn persisted_id(&self) -> Result<MemberId, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Internal("member has not been persisted".to_string()))
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_nickname() {
        assert!(matches!(
            Member::create("  "),
            Err(DomainError::Validation(_))
        ));
        assert!(Member::create("n".repeat(NICKNAME_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_new_member_is_transient() {
        let member = Member::create("alice").unwrap();
        assert_eq!(member.nickname(), "alice");
        assert_eq!(member.id(), None);
        assert_eq!(member.created_at(), member.updated_at());
        assert!(member.persisted_id().is_err());
    }
}
