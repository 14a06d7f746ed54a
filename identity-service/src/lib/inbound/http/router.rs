use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::current_identity::current_identity;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh_session::refresh_session;
use super::handlers::register::register;
use super::handlers::update_account::update_account;
use super::middleware::require_session;
use crate::domain::identity::service::IdentityService;
use crate::domain::session::service::SessionService;
use crate::outbound::repositories::identity::PostgresIdentityRepository;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService<PostgresIdentityRepository>>,
    pub session_service: Arc<SessionService<PostgresIdentityRepository>>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(
    identity_service: Arc<IdentityService<PostgresIdentityRepository>>,
    session_service: Arc<SessionService<PostgresIdentityRepository>>,
    token_issuer: Arc<TokenIssuer>,
) -> Router {
    let state = AppState {
        identity_service,
        session_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_session));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/change-password", post(change_password))
        .route("/api/accounts/me", get(current_identity))
        .route("/api/accounts/me", patch(update_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
