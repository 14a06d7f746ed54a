use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::ChangePasswordCommand;
use crate::inbound::http::middleware::CurrentIdentity;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentIdentity>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError> {
    state
        .session_service
        .change_password(&current.0.id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChangePasswordResponseData {
            message: "Password changed".to_string(),
        },
    ))
}

/// HTTP request body for a credential change (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}

impl ChangePasswordRequest {
    fn try_into_command(self) -> Result<ChangePasswordCommand, ApiError> {
        if self.old_password.trim().is_empty() || self.new_password.trim().is_empty() {
            return Err(ApiError::BadRequest("All fields are required".to_string()));
        }

        Ok(ChangePasswordCommand {
            old_password: self.old_password,
            new_password: self.new_password,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub message: String,
}
