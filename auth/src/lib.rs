//! Authentication infrastructure library
//!
//! Provides the credential and session-token primitives used by the
//! identity service:
//! - Password hashing (Argon2id, configurable work factor)
//! - Paired access/refresh token issuance and verification, with
//!   independent secrets and expiries per token class
//!
//! The service defines its own ports on top of these implementations, so
//! the crate stays free of any persistence or transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(2).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(&TokenConfig {
//!     access_secret: "access_secret_at_least_32_bytes_long!".to_string(),
//!     access_ttl: Duration::minutes(15),
//!     refresh_secret: "refresh_secret_at_least_32_bytes_long".to_string(),
//!     refresh_ttl: Duration::days(10),
//! });
//!
//! let token = issuer.issue_refresh("user123").unwrap();
//! let claims = issuer.verify_refresh(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::RefreshClaims;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenIssuer;
