use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::session::models::LoginCommand;
use crate::inbound::http::cookies::with_session_cookies;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let outcome = state.session_service.login(body.into_command()).await?;

    let jar = with_session_cookies(
        jar,
        outcome.tokens.access_token.clone(),
        outcome.tokens.refresh_token.clone(),
    );

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                identity: (&outcome.identity).into(),
                access_token: outcome.tokens.access_token,
                refresh_token: outcome.tokens.refresh_token,
            },
        ),
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    email: Option<String>,
    password: String,
}

impl LoginRequest {
    fn into_command(self) -> LoginCommand {
        // Blank strings count as absent, same as a missing field.
        LoginCommand {
            username: self.username.filter(|username| !username.trim().is_empty()),
            email: self.email.filter(|email| !email.trim().is_empty()),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub identity: IdentityData,
    pub access_token: String,
    pub refresh_token: String,
}
