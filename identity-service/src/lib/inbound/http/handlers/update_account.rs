use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::FullName;
use crate::domain::identity::models::UpdateProfileCommand;
use crate::identity::errors::EmailError;
use crate::identity::errors::FullNameError;
use crate::identity::ports::IdentityServicePort;
use crate::inbound::http::middleware::CurrentIdentity;
use crate::inbound::http::router::AppState;

pub async fn update_account(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentIdentity>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    state
        .identity_service
        .update_profile(&current.0.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

/// HTTP request body for a profile update (raw JSON)
///
/// No password field: credential changes go through their own route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAccountRequest {
    full_name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateAccountRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid full name: {0}")]
    FullName(#[from] FullNameError),
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ParseUpdateAccountRequestError> {
        let full_name = self.full_name.map(FullName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateProfileCommand { full_name, email })
    }
}

impl From<ParseUpdateAccountRequestError> for ApiError {
    fn from(err: ParseUpdateAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
