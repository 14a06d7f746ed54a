use thiserror::Error;

use crate::identity::errors::IdentityError;

/// Top-level error for login, rotation, and session verification.
///
/// Expected outcomes (wrong password, expired token, stale rotation) are
/// ordinary variants here; only infrastructure failures are genuinely
/// exceptional.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Username or email is required")]
    MissingCredentials,

    #[error("Refresh token is required")]
    MissingRefreshToken,

    #[error("No identity matches the supplied credentials")]
    UnknownIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session token is invalid: {0}")]
    TokenInvalid(String),

    #[error("Session token is expired")]
    TokenExpired,

    #[error("Refresh token no longer matches the stored session")]
    StaleToken,

    #[error("Failed to issue session tokens: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl From<auth::TokenError> for SessionError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::Expired => SessionError::TokenExpired,
            auth::TokenError::Invalid(msg) => SessionError::TokenInvalid(msg),
            auth::TokenError::SigningFailed(msg) => SessionError::TokenIssuance(msg),
        }
    }
}
