use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by an access token.
///
/// Descriptive fields ride along so request handling does not need a store
/// lookup just to display who is calling. Short-lived by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (identity identifier)
    pub sub: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create access claims expiring `ttl` from now.
    pub fn new(
        sub: impl ToString,
        username: impl ToString,
        email: impl ToString,
        full_name: impl ToString,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Claims carried by a refresh token.
///
/// Deliberately minimal: the subject is all a leaked token would reveal,
/// and all it is good for is asking the store for a fresh pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (identity identifier)
    pub sub: String,
    /// JWT ID (unique token identifier); keeps every issued token distinct
    /// even when two are minted for the same subject in the same second
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Create refresh claims expiring `ttl` from now.
    pub fn new(sub: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}
