use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are split by cause so callers can tell an expired
/// token from a forged one; HTTP layers usually collapse them into a single
/// "invalid token" response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature does not match its contents")]
    Tampered,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
