use std::sync::Arc;

use account_service::config::Config;
use account_service::config::SessionStoreKind;
use account_service::domain::authentication::service::AuthService;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresUserRepository;
use account_service::outbound::sessions::spawn_sweeper;
use account_service::outbound::sessions::InMemorySessionRegistry;
use account_service::outbound::sessions::PostgresSessionRegistry;
use account_service::outbound::sessions::SessionStore;
use auth::PasswordHasher;
use auth::TokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_days = config.jwt.access_token_days,
        refresh_token_days = config.jwt.refresh_token_days,
        session_store = ?config.session.store,
        rotate_refresh_tokens = config.session.rotate_refresh_tokens,
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

    let password_hasher = PasswordHasher::with_work_factor(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let token_issuer = Arc::new(
        TokenIssuer::new(config.jwt.secret.as_bytes())
            .with_lifetimes(config.jwt.access_lifetime(), config.jwt.refresh_lifetime()),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let sessions = Arc::new(match config.session.store {
        SessionStoreKind::Memory => SessionStore::Memory(InMemorySessionRegistry::new()),
        SessionStoreKind::Postgres => {
            SessionStore::Postgres(PostgresSessionRegistry::new(pg_pool.clone()))
        }
    });
    let sweeper = spawn_sweeper(Arc::clone(&sessions), config.session.sweep_interval());

    let auth_service = Arc::new(
        AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&sessions),
            Arc::clone(&token_issuer),
            password_hasher.clone(),
        )
        .with_refresh_rotation(config.session.rotate_refresh_tokens),
    );
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service);
    let result = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.abort();

    if let Err(e) = result {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
