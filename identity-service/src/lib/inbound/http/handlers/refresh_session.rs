use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::cookies::with_session_cookies;
use crate::inbound::http::cookies::REFRESH_TOKEN_COOKIE;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub async fn refresh_session(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<(CookieJar, ApiSuccess<TokenPairData>), ApiError> {
    // Cookie first, request body as the fallback.
    let presented = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| body.and_then(|Json(body)| body.refresh_token));

    let tokens = state.session_service.rotate(presented).await?;

    let jar = with_session_cookies(
        jar,
        tokens.access_token.clone(),
        tokens.refresh_token.clone(),
    );

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            TokenPairData {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
        ),
    ))
}

/// HTTP request body for token refresh (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct RefreshRequest {
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}
