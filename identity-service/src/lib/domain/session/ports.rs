use async_trait::async_trait;

use crate::domain::identity::models::IdentityId;
use crate::domain::session::models::ChangePasswordCommand;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::TokenPair;
use crate::session::errors::SessionError;

/// Port for session lifecycle operations: credential login, refresh-token
/// rotation, logout, and credential change.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Open a session from presented credentials.
    ///
    /// On success the stored refresh token is overwritten with the new one;
    /// this is the only path allowed to do so without reading the prior
    /// value.
    ///
    /// # Errors
    /// * `MissingCredentials` - Neither username nor email supplied
    /// * `UnknownIdentity` - No identity matches the supplied name
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssuance` - Signing backend failure
    /// * `Identity` - Store failure
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError>;

    /// Exchange a valid refresh token for a fresh pair, invalidating the
    /// presented token.
    ///
    /// # Errors
    /// * `MissingRefreshToken` - No token supplied
    /// * `TokenExpired` / `TokenInvalid` - Verification failure
    /// * `StaleToken` - Presented token no longer matches the stored value
    ///   (already rotated, revoked by logout, or a lost rotation race)
    async fn rotate(&self, presented: Option<String>) -> Result<TokenPair, SessionError>;

    /// Close the subject's session. Idempotent: clearing an already-empty
    /// session succeeds.
    async fn logout(&self, id: &IdentityId) -> Result<(), SessionError>;

    /// Replace the stored credential after verifying the old one.
    ///
    /// # Errors
    /// * `UnknownIdentity` - Subject no longer exists
    /// * `InvalidCredentials` - Old password does not match
    /// * `Identity` - Hashing or store failure
    async fn change_password(
        &self,
        id: &IdentityId,
        command: ChangePasswordCommand,
    ) -> Result<(), SessionError>;
}
