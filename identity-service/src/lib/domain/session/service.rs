use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::IdentityView;
use crate::domain::session::models::ChangePasswordCommand;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginOutcome;
use crate::domain::session::models::TokenPair;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;
use crate::session::errors::SessionError;
use crate::session::ports::SessionServicePort;

/// Session lifecycle service: login, refresh rotation, logout, and
/// credential change.
///
/// One live refresh token per identity. Rotation relies on the store's
/// compare-and-swap so that of two concurrent exchanges of the same token
/// exactly one wins; the loser surfaces `StaleToken`.
pub struct SessionService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
}

impl<IR> SessionService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `token_issuer` - Issuer configured with both token classes
    /// * `password_hasher` - Hasher configured with the service work factor
    pub fn new(
        repository: Arc<IR>,
        token_issuer: Arc<TokenIssuer>,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher,
        }
    }

    async fn find_for_login(&self, command: &LoginCommand) -> Result<Identity, SessionError> {
        let identity = match (command.username.as_deref(), command.email.as_deref()) {
            (None, None) => return Err(SessionError::MissingCredentials),
            (Some(username), _) => {
                self.repository
                    .find_by_username(&username.trim().to_lowercase())
                    .await?
            }
            (None, Some(email)) => self.repository.find_by_email(email.trim()).await?,
        };

        identity.ok_or(SessionError::UnknownIdentity)
    }

    fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, SessionError> {
        let subject = identity.id.to_string();

        let access_token = self.token_issuer.issue_access(
            &subject,
            identity.username.as_str(),
            identity.email.as_str(),
            identity.full_name.as_str(),
        )?;
        let refresh_token = self.token_issuer.issue_refresh(&subject)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<IR> SessionServicePort for SessionService<IR>
where
    IR: IdentityRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, SessionError> {
        let identity = self.find_for_login(&command).await?;

        if !self
            .password_hasher
            .verify(&command.password, &identity.password_hash)
        {
            return Err(SessionError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&identity)?;

        // Login may overwrite whatever session existed before; it is the
        // one path that writes without reading the prior value.
        self.repository
            .store_refresh_token(&identity.id, &tokens.refresh_token)
            .await?;

        tracing::info!(identity_id = %identity.id, "Session opened");

        Ok(LoginOutcome {
            identity: IdentityView::from(&identity),
            tokens,
        })
    }

    async fn rotate(&self, presented: Option<String>) -> Result<TokenPair, SessionError> {
        let presented = presented.ok_or(SessionError::MissingRefreshToken)?;

        let claims = self.token_issuer.verify_refresh(&presented)?;
        let id = IdentityId::from_string(&claims.sub)
            .map_err(|e| SessionError::TokenInvalid(e.to_string()))?;

        let identity = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| SessionError::TokenInvalid("unknown subject".to_string()))?;

        let tokens = self.issue_pair(&identity)?;

        // Single compare-and-swap keyed on the presented value. Of two
        // concurrent exchanges of the same token, the store lets exactly
        // one through; the other observes no match.
        let swapped = self
            .repository
            .swap_refresh_token(&id, &presented, &tokens.refresh_token)
            .await?;

        if !swapped {
            tracing::warn!(
                identity_id = %id,
                "Stale refresh token presented (already rotated, revoked, or lost race)"
            );
            return Err(SessionError::StaleToken);
        }

        Ok(tokens)
    }

    async fn logout(&self, id: &IdentityId) -> Result<(), SessionError> {
        self.repository.clear_refresh_token(id).await?;

        tracing::info!(identity_id = %id, "Session closed");

        Ok(())
    }

    async fn change_password(
        &self,
        id: &IdentityId,
        command: ChangePasswordCommand,
    ) -> Result<(), SessionError> {
        let identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SessionError::UnknownIdentity)?;

        if !self
            .password_hasher
            .verify(&command.old_password, &identity.password_hash)
        {
            return Err(SessionError::InvalidCredentials);
        }

        let new_hash = self
            .password_hasher
            .hash(&command.new_password)
            .map_err(IdentityError::from)?;

        // The current refresh token deliberately survives a credential
        // change; see DESIGN.md.
        self.repository.set_password_hash(id, &new_hash).await?;

        tracing::info!(identity_id = %id, "Credential changed");

        Ok(())
    }
}
