use crate::domain::Member;
use crate::error::DomainError;
use crate::ports::UnitOfWork;

/// Get-or-create: return the member named `nickname`, inserting one through
/// `uow` if none exists yet.
///
/// The insert happens inside the caller's transaction, so it is rolled back
/// together with everything else if the caller fails. Nicknames are not
/// authenticated; whoever sends a nickname acts as that member.
pub async fn resolve_member(uow: &dyn UnitOfWork, nickname: &str) -> Result<Member, DomainError> {
    let existing = uow.members().find_by_nickname(nickname).await?;
    if let Some(member) = existing {
        tracing::debug!(member_id = ?member.id(), "Reusing member by nickname");
        return Ok(member);
    }

    let member = uow.members().save(Member::create(nickname)?).await?;
    tracing::info!(member_id = ?member.id(), "Created member on first write");
    Ok(member)
}
