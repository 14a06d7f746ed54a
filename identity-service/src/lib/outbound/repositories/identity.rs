use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::FullName;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn database_error(e: sqlx::Error) -> IdentityError {
        IdentityError::Database(e.to_string())
    }

    fn identity_from_row(row: &PgRow) -> Result<Identity, IdentityError> {
        let username: String = row.try_get("username").map_err(Self::database_error)?;
        let email: String = row.try_get("email").map_err(Self::database_error)?;
        let full_name: String = row.try_get("full_name").map_err(Self::database_error)?;

        Ok(Identity {
            id: IdentityId(row.try_get("id").map_err(Self::database_error)?),
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            full_name: FullName::new(full_name)?,
            password_hash: row.try_get("password_hash").map_err(Self::database_error)?,
            current_refresh_token: row
                .try_get("current_refresh_token")
                .map_err(Self::database_error)?,
            created_at: row.try_get("created_at").map_err(Self::database_error)?,
            updated_at: row.try_get("updated_at").map_err(Self::database_error)?,
        })
    }

    fn map_unique_violation(e: sqlx::Error, identity: &Identity) -> IdentityError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                if db_err.constraint() == Some("identities_username_key") {
                    return IdentityError::UsernameAlreadyExists(
                        identity.username.as_str().to_string(),
                    );
                }
                if db_err.constraint() == Some("identities_email_key") {
                    return IdentityError::EmailAlreadyExists(identity.email.as_str().to_string());
                }
            }
        }
        Self::database_error(e)
    }
}

const IDENTITY_COLUMNS: &str = "id, username, email, full_name, password_hash, \
     current_refresh_token, created_at, updated_at";

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO identities
                (id, username, email, full_name, password_hash,
                 current_refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(identity.full_name.as_str())
        .bind(&identity.password_hash)
        .bind(&identity.current_refresh_token)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &identity))?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.as_ref().map(Self::identity_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.as_ref().map(Self::identity_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.as_ref().map(Self::identity_from_row).transpose()
    }

    async fn update_profile(&self, identity: Identity) -> Result<Identity, IdentityError> {
        // Profile writes stop at these columns; password_hash and
        // current_refresh_token belong to the credential and session paths.
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET email = $2, full_name = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.email.as_str())
        .bind(identity.full_name.as_str())
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique_violation(e, &identity))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        Ok(identity)
    }

    async fn set_password_hash(
        &self,
        id: &IdentityId,
        password_hash: &str,
    ) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET password_hash = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn store_refresh_token(
        &self,
        id: &IdentityId,
        token: &str,
    ) -> Result<(), IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET current_refresh_token = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(token)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        id: &IdentityId,
        current: &str,
        replacement: &str,
    ) -> Result<bool, IdentityError> {
        // Single-statement compare-and-swap: the WHERE clause is the match
        // check, so two concurrent rotations of the same token can never
        // both see a hit.
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET current_refresh_token = $3, updated_at = $4
            WHERE id = $1 AND current_refresh_token = $2
            "#,
        )
        .bind(id.0)
        .bind(current)
        .bind(replacement)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_refresh_token(&self, id: &IdentityId) -> Result<(), IdentityError> {
        // Zero affected rows is fine: already clear, or the identity is gone.
        sqlx::query(
            r#"
            UPDATE identities
            SET current_refresh_token = NULL, updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(Self::database_error)?;

        Ok(())
    }
}
