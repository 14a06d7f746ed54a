use async_trait::async_trait;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::IdentityError;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity with validated fields.
    ///
    /// The plaintext credential is hashed exactly once, here.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing backend failure
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError>;

    /// Update profile fields of an existing identity.
    ///
    /// Never reads or writes the password hash or the session token.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Database` - Store operation failed
    async fn update_profile(
        &self,
        id: &IdentityId,
        command: UpdateProfileCommand,
    ) -> Result<Identity, IdentityError>;
}

/// Persistence operations for the identity aggregate.
///
/// The store exclusively owns persisted Identity state; callers only hold
/// request-scoped values returned by lookups.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Store operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity entity (None if not found)
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by case-normalized username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Write profile fields (username, email, full name) of an identity.
    ///
    /// Must not touch the credential or session columns.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Database` - Store operation failed
    async fn update_profile(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn set_password_hash(
        &self,
        id: &IdentityId,
        password_hash: &str,
    ) -> Result<(), IdentityError>;

    /// Overwrite the stored refresh token unconditionally.
    ///
    /// Login is the only caller; it may move the token from any prior
    /// value to a new one without reading first.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn store_refresh_token(
        &self,
        id: &IdentityId,
        token: &str,
    ) -> Result<(), IdentityError>;

    /// Atomically replace the stored refresh token, keyed on its expected
    /// current value.
    ///
    /// # Returns
    /// `true` if the stored value equaled `current` and was replaced;
    /// `false` if it did not match (already rotated, revoked, or a lost
    /// race) and nothing was written.
    async fn swap_refresh_token(
        &self,
        id: &IdentityId,
        current: &str,
        replacement: &str,
    ) -> Result<bool, IdentityError>;

    /// Clear the stored refresh token. Idempotent.
    async fn clear_refresh_token(&self, id: &IdentityId) -> Result<(), IdentityError>;
}
