use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::IdentityView;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityServicePort;
use crate::inbound::http::cookies::ACCESS_TOKEN_COOKIE;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved identity for the request.
///
/// Holds the sanitized view only; downstream handlers never see the stored
/// credential or session token.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub IdentityView);

/// Session guard: verifies an access token and resolves it to an identity
/// before handing the request downstream.
///
/// The token comes from the `accessToken` cookie or, failing that, an
/// `Authorization: Bearer` header. Access tokens are never individually
/// revoked; their short expiry is the only safety net.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_access_token(&req).ok_or_else(|| {
        ApiError::Unauthorized("Missing access token".to_string()).into_response()
    })?;

    let claims = state.token_issuer.verify_access(&token).map_err(|e| {
        tracing::warn!("Access token rejected: {}", e);
        ApiError::Unauthorized("Invalid or expired access token".to_string()).into_response()
    })?;

    let identity_id = IdentityId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Access token carried a malformed subject: {}", e);
        ApiError::Unauthorized("Invalid or expired access token".to_string()).into_response()
    })?;

    let identity = state
        .identity_service
        .get_identity(&identity_id)
        .await
        .map_err(|e| match e {
            // A token can outlive its subject; that is still a 401, not a 404.
            IdentityError::NotFound(_) => {
                ApiError::Unauthorized("Invalid or expired access token".to_string())
                    .into_response()
            }
            other => ApiError::from(other).into_response(),
        })?;

    req.extensions_mut()
        .insert(CurrentIdentity(IdentityView::from(&identity)));

    Ok(next.run(req).await)
}

fn extract_access_token(req: &Request) -> Option<String> {
    // Cookie takes precedence over the header.
    let jar = CookieJar::from_headers(req.headers());
    if let Some(cookie) = jar.get(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    bearer_token(req)
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
