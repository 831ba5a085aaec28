use std::sync::Arc;

use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::session::service::AuthSessionService;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::hasher::Argon2CredentialHasher;
use identity_service::outbound::repositories::PostgresUserRepository;
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
        max_connections = config.database.max_connections,
        query_timeout_ms = config.database.query_timeout_ms,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let issuer = Arc::new(TokenIssuer::new(config.jwt.secret.as_bytes()));
    let hasher = Arc::new(Argon2CredentialHasher::from_config(&config.password)?);
    let user_repository = Arc::new(PostgresUserRepository::new(
        pg_pool,
        config.database.query_timeout(),
    ));

    let session_service = Arc::new(AuthSessionService::new(
        Arc::clone(&user_repository),
        Arc::clone(&hasher),
        issuer,
    ));
    let user_service = Arc::new(UserService::new(user_repository, hasher));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, user_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
