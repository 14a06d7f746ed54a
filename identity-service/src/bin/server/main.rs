use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::identity::service::IdentityService;
use identity_service::domain::session::service::SessionService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresIdentityRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_expiry_minutes = config.auth.access_token_expiry_minutes,
        refresh_token_expiry_days = config.auth.refresh_token_expiry_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::new(config.auth.hashing_work_factor)?;
    let token_issuer = Arc::new(TokenIssuer::new(&config.auth.token_config()));
    let repository = Arc::new(PostgresIdentityRepository::new(pg_pool));

    let identity_service = Arc::new(IdentityService::new(
        Arc::clone(&repository),
        password_hasher.clone(),
    ));
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&repository),
        Arc::clone(&token_issuer),
        password_hasher,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, session_service, token_issuer);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
