use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::cookies::without_session_cookies;
use crate::inbound::http::middleware::CurrentIdentity;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentIdentity>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<LogoutResponseData>), ApiError> {
    state.session_service.logout(&current.0.id).await?;

    let jar = without_session_cookies(jar);

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "Logged out".to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
