//! Permission evaluation.
//!
//! Plain role authorization plus the operation-specific guards layered on top of
//! it. Every function here is pure: no I/O, no clock, no shared state.

use thiserror::Error;

use crate::account::models::Account;
use crate::account::models::AccountStatus;
use crate::account::models::Role;
use crate::post::models::Post;

/// Roles accepted by operations open to any signed-in account.
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Moderator, Role::User];

/// Roles accepted by account administration.
pub const STAFF: &[Role] = &[Role::Admin, Role::Moderator];

/// Roles accepted by irreversible account operations.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Denial raised by an operation-specific guard.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("Invalid operation: you can't change your own status")]
    SelfAction,

    #[error("Invalid operation on an account with a higher role")]
    TargetOutranksActor,

    #[error("Invalid operation: you can't grant a role above your own")]
    RoleAboveActor,

    #[error("Invalid operation on user account")]
    InactiveTarget,

    #[error("User already deactivated")]
    AlreadyDeactivated,

    #[error("User already active")]
    AlreadyActive,

    #[error("Invalid: you can't edit this post")]
    NotAuthor,

    #[error("Invalid: you can't delete this post")]
    CannotRemovePost,
}

impl PolicyViolation {
    /// Redundant state transitions are user errors about current state,
    /// not permission denials.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            PolicyViolation::AlreadyDeactivated | PolicyViolation::AlreadyActive
        )
    }

    /// Violation for a transition into the status an account already holds.
    pub fn already_in(status: AccountStatus) -> Self {
        match status {
            AccountStatus::Active => PolicyViolation::AlreadyActive,
            AccountStatus::Inactive => PolicyViolation::AlreadyDeactivated,
        }
    }
}

/// True iff the account's role is one of `allowed_roles`.
pub fn authorize(account: &Account, allowed_roles: &[Role]) -> bool {
    allowed_roles.contains(&account.role)
}

/// Reject an actor operating on its own account.
pub fn ensure_not_self(actor: &Account, target: &Account) -> Result<(), PolicyViolation> {
    if actor.id == target.id {
        return Err(PolicyViolation::SelfAction);
    }
    Ok(())
}

/// Reject an actor operating on an account ranked above it.
pub fn ensure_not_outranked(actor: &Account, target: &Account) -> Result<(), PolicyViolation> {
    if target.role.rank() > actor.role.rank() {
        return Err(PolicyViolation::TargetOutranksActor);
    }
    Ok(())
}

/// Reject granting a role ranked above the actor's own.
pub fn ensure_can_grant(actor: &Account, role: Role) -> Result<(), PolicyViolation> {
    if role.rank() > actor.role.rank() {
        return Err(PolicyViolation::RoleAboveActor);
    }
    Ok(())
}

/// Reject role changes on deactivated accounts.
pub fn ensure_active_target(target: &Account) -> Result<(), PolicyViolation> {
    if !target.is_active() {
        return Err(PolicyViolation::InactiveTarget);
    }
    Ok(())
}

/// Reject a status change that would leave the status unchanged.
pub fn ensure_status_transition(
    current: AccountStatus,
    requested: AccountStatus,
) -> Result<(), PolicyViolation> {
    if current == requested {
        return Err(PolicyViolation::already_in(requested));
    }
    Ok(())
}

/// Only the author may edit a post.
pub fn ensure_owner(actor: &Account, post: &Post) -> Result<(), PolicyViolation> {
    if post.author_id != actor.id {
        return Err(PolicyViolation::NotAuthor);
    }
    Ok(())
}

/// The author, or staff, may delete a post.
pub fn ensure_can_remove_post(actor: &Account, post: &Post) -> Result<(), PolicyViolation> {
    if post.author_id == actor.id || authorize(actor, STAFF) {
        return Ok(());
    }
    Err(PolicyViolation::CannotRemovePost)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::account::models::AccountId;
    use crate::account::models::EmailAddress;
    use crate::account::models::PersonName;
    use crate::post::models::PostContent;
    use crate::post::models::PostId;
    use crate::post::models::PostStatus;
    use crate::post::models::PostTitle;

    fn account(role: Role) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            first_name: PersonName::new("Test".to_string()).unwrap(),
            last_name: PersonName::new("Account".to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", role)).unwrap(),
            role,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn post_by(author: &Account) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(),
            title: PostTitle::new("Title".to_string()).unwrap(),
            content: PostContent::new("Body".to_string()).unwrap(),
            author_id: author.id,
            tags: vec![],
            status: PostStatus::Draft,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Every subset of the three roles.
    fn all_role_sets() -> Vec<Vec<Role>> {
        (0u8..8)
            .map(|mask| {
                Role::ALL
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| *role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_authorize_is_role_membership() {
        for role in Role::ALL {
            let account = account(role);
            for allowed in all_role_sets() {
                assert_eq!(
                    authorize(&account, &allowed),
                    allowed.contains(&role),
                    "role {} against {:?}",
                    role,
                    allowed
                );
            }
        }
    }

    #[test]
    fn test_route_requirements() {
        assert!(authorize(&account(Role::User), ANY_ROLE));
        assert!(!authorize(&account(Role::User), STAFF));
        assert!(authorize(&account(Role::Moderator), STAFF));
        assert!(!authorize(&account(Role::Moderator), ADMIN_ONLY));
        assert!(authorize(&account(Role::Admin), ADMIN_ONLY));
    }

    #[test]
    fn test_self_action_guard() {
        let actor = account(Role::Admin);
        let other = account(Role::User);

        assert_eq!(
            ensure_not_self(&actor, &actor),
            Err(PolicyViolation::SelfAction)
        );
        assert_eq!(ensure_not_self(&actor, &other), Ok(()));
    }

    #[test]
    fn test_hierarchy_guard() {
        let admin = account(Role::Admin);
        let moderator = account(Role::Moderator);
        let user = account(Role::User);

        assert_eq!(
            ensure_not_outranked(&moderator, &admin),
            Err(PolicyViolation::TargetOutranksActor)
        );
        assert_eq!(ensure_not_outranked(&moderator, &moderator), Ok(()));
        assert_eq!(ensure_not_outranked(&moderator, &user), Ok(()));
        assert_eq!(ensure_not_outranked(&admin, &admin), Ok(()));
        assert_eq!(ensure_not_outranked(&admin, &moderator), Ok(()));
    }

    #[test]
    fn test_role_grant_guard() {
        let moderator = account(Role::Moderator);
        let admin = account(Role::Admin);

        assert_eq!(
            ensure_can_grant(&moderator, Role::Admin),
            Err(PolicyViolation::RoleAboveActor)
        );
        assert_eq!(ensure_can_grant(&moderator, Role::Moderator), Ok(()));
        assert_eq!(ensure_can_grant(&admin, Role::Admin), Ok(()));
    }

    #[test]
    fn test_active_target_guard() {
        let mut target = account(Role::User);
        assert_eq!(ensure_active_target(&target), Ok(()));

        target.status = AccountStatus::Inactive;
        assert_eq!(
            ensure_active_target(&target),
            Err(PolicyViolation::InactiveTarget)
        );
    }

    #[test]
    fn test_already_in_state_guard() {
        use AccountStatus::*;

        assert_eq!(
            ensure_status_transition(Inactive, Inactive),
            Err(PolicyViolation::AlreadyDeactivated)
        );
        assert_eq!(
            ensure_status_transition(Active, Active),
            Err(PolicyViolation::AlreadyActive)
        );
        assert_eq!(ensure_status_transition(Active, Inactive), Ok(()));
        assert_eq!(ensure_status_transition(Inactive, Active), Ok(()));
        assert!(PolicyViolation::AlreadyDeactivated.is_conflict());
        assert!(!PolicyViolation::SelfAction.is_conflict());
    }

    #[test]
    fn test_ownership_guard() {
        let author = account(Role::User);
        let admin = account(Role::Admin);
        let post = post_by(&author);

        assert_eq!(ensure_owner(&author, &post), Ok(()));
        assert_eq!(
            ensure_owner(&admin, &post),
            Err(PolicyViolation::NotAuthor)
        );
    }

    #[test]
    fn test_post_removal_guard() {
        let author = account(Role::User);
        let stranger = account(Role::User);
        let post = post_by(&author);

        assert_eq!(ensure_can_remove_post(&author, &post), Ok(()));
        assert_eq!(ensure_can_remove_post(&account(Role::Moderator), &post), Ok(()));
        assert_eq!(ensure_can_remove_post(&account(Role::Admin), &post), Ok(()));
        assert_eq!(
            ensure_can_remove_post(&stranger, &post),
            Err(PolicyViolation::CannotRemovePost)
        );
    }
}
