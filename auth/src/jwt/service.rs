use std::sync::Arc;

use chrono::Duration;

use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues and verifies time-limited identity tokens.
///
/// A token binds a subject identifier to an expiry instant. There is no
/// revocation: a token stays verifiable until it expires, so callers that need
/// to honour account state changes must re-check that state on every use.
pub struct TokenService {
    handler: JwtHandler,
    ttl: Duration,
    issuer: Option<String>,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create a token service signing with `secret` and issuing tokens valid for `ttl`.
    ///
    /// Uses the system clock; see [`TokenService::with_clock`].
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
            issuer: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for issuance and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Stamp issued tokens with `issuer` and reject tokens from any other issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for `subject`, expiring `ttl` after the current clock time.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let mut claims = Claims::for_subject(subject, self.clock.now(), self.ttl);
        claims.iss = self.issuer.clone();

        self.handler.encode(&claims)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `Tampered` - Signature does not match the payload
    /// * `Malformed` - Structure is invalid, or `sub`/`exp` are missing, or the issuer differs
    /// * `Expired` - Current clock time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        if self.issuer.is_some() && claims.iss != self.issuer {
            return Err(TokenError::Malformed("unexpected issuer".to_string()));
        }

        if claims.exp.is_none() {
            return Err(TokenError::Malformed("missing exp claim".to_string()));
        }

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::Expired);
        }

        claims
            .sub
            .ok_or_else(|| TokenError::Malformed("missing sub claim".to_string()))
    }
}
