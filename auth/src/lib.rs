//! Authentication utilities library
//!
//! Domain-agnostic building blocks for identity:
//! - Password hashing (Argon2id, tunable work factor)
//! - Signed, time-limited identity tokens (HS256 JWT) with an injectable clock
//! - Authentication coordination
//!
//! Services decide what a subject identifier means and which account state makes
//! a verified token acceptable; this crate only proves who signed what, and when.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = tokens.issue("account-1").unwrap();
//! assert_eq!(tokens.verify(&token).unwrap(), "account-1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, TokenService};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new(),
//!     TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "account-1").unwrap();
//!
//! // Later requests: verify token
//! let subject = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(subject, "account-1");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
