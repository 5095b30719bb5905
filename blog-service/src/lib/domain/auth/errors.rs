use auth::TokenError;
use thiserror::Error;

/// Rejection reasons of the request-time identity and permission checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No token provided")]
    NoTokenProvided,

    /// Expired, tampered and malformed tokens share one outward message.
    #[error("Invalid or expired token")]
    InvalidToken(#[from] TokenError),

    /// The token subject does not name an existing account.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("You have been deactivated!")]
    AccountInactive,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}
