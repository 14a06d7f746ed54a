use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    password_hasher: PasswordHasher,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `password_hasher` - Hasher configured with the service work factor
    pub fn new(repository: Arc<IR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        let password_hash = self.password_hasher.hash(&command.password)?;
        let now = Utc::now();

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            current_refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(identity).await?;

        tracing::info!(identity_id = %created.id, "Identity registered");

        Ok(created)
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &IdentityId,
        command: UpdateProfileCommand,
    ) -> Result<Identity, IdentityError> {
        let mut identity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))?;

        if let Some(new_full_name) = command.full_name {
            identity.full_name = new_full_name;
        }

        if let Some(new_email) = command.email {
            identity.email = new_email;
        }

        identity.updated_at = Utc::now();

        // The repository's profile write never includes the credential or
        // session columns, so the stored hash is carried through untouched.
        self.repository.update_profile(identity).await
    }
}
