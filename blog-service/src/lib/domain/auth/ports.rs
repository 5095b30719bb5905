use async_trait::async_trait;

use crate::account::models::Account;
use crate::account::models::Role;
use crate::domain::auth::errors::AuthError;

/// Request-time identity and permission checks.
#[async_trait]
pub trait AuthGatePort: Send + Sync + 'static {
    /// Verify a bearer token and resolve it to a live account.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token, `None` when the request carried none
    ///
    /// # Errors
    /// * `NoTokenProvided` - No token
    /// * `InvalidToken` - Token expired, tampered or malformed
    /// * `Unauthorized` - Token subject no longer exists
    /// * `AccountInactive` - Token subject is deactivated
    /// * `Internal` - Account lookup failed
    async fn authenticate(&self, token: Option<&str>) -> Result<Account, AuthError>;

    /// Resolve a verified token subject to a live account.
    ///
    /// # Errors
    /// * `Unauthorized` - Subject is not an account id, or the account does not exist
    /// * `AccountInactive` - Account is deactivated
    /// * `Internal` - Account lookup failed
    async fn resolve(&self, subject: &str) -> Result<Account, AuthError>;

    /// Check a resolved account against an operation's accepted roles.
    ///
    /// # Errors
    /// * `Forbidden` - Account role is not accepted
    fn authorize(&self, account: &Account, allowed_roles: &[Role]) -> Result<(), AuthError>;
}
