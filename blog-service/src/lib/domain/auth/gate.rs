use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::Role;
use crate::account::ports::AccountRepository;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::policy;
use crate::domain::auth::ports::AuthGatePort;

/// Composes token verification, identity resolution and role authorization.
///
/// Holds no per-request state. Every call re-reads the account, which is what
/// makes deactivation and deletion take effect on tokens that are still
/// cryptographically valid.
pub struct AuthGate<AR>
where
    AR: AccountRepository,
{
    authenticator: Arc<Authenticator>,
    repository: Arc<AR>,
}

impl<AR> AuthGate<AR>
where
    AR: AccountRepository,
{
    pub fn new(authenticator: Arc<Authenticator>, repository: Arc<AR>) -> Self {
        Self {
            authenticator,
            repository,
        }
    }
}

#[async_trait]
impl<AR> AuthGatePort for AuthGate<AR>
where
    AR: AccountRepository,
{
    async fn authenticate(&self, token: Option<&str>) -> Result<Account, AuthError> {
        let token = token.ok_or(AuthError::NoTokenProvided)?;

        let subject = self.authenticator.verify_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            AuthError::from(e)
        })?;

        self.resolve(&subject).await
    }

    async fn resolve(&self, subject: &str) -> Result<Account, AuthError> {
        let id = AccountId::from_string(subject).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not an account id");
            AuthError::Unauthorized
        })?;

        let account = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(|e| {
                tracing::error!(account_id = %id, error = %e, "Account lookup failed");
                AuthError::Internal(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(account_id = %id, "Token subject no longer exists");
                AuthError::Unauthorized
            })?;

        if !account.is_active() {
            tracing::warn!(account_id = %id, "Rejected token of deactivated account");
            return Err(AuthError::AccountInactive);
        }

        Ok(account)
    }

    fn authorize(&self, account: &Account, allowed_roles: &[Role]) -> Result<(), AuthError> {
        if policy::authorize(account, allowed_roles) {
            Ok(())
        } else {
            tracing::warn!(
                account_id = %account.id,
                role = %account.role,
                "Role not permitted for operation"
            );
            Err(AuthError::Forbidden)
        }
    }
}
