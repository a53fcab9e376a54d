use std::sync::Arc;

use auth::Authenticator;
use library_service::config::Config;
use library_service::domain::account::ports::AccountServicePort;
use library_service::domain::account::service::AccountService;
use library_service::domain::book::ports::BookServicePort;
use library_service::domain::book::service::BookService;
use library_service::i18n::Catalog;
use library_service::inbound::http::openapi::SWAGGER_UI_PATH;
use library_service::inbound::http::router::create_router;
use library_service::inbound::http::router::AppState;
use library_service::outbound::repositories::InMemoryAccountRepository;
use library_service::outbound::repositories::InMemoryBookRepository;
use library_service::outbound::repositories::PostgresAccountRepository;
use library_service::outbound::repositories::PostgresBookRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "library-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent_store = config.database.url.is_some(),
        token_ttl_minutes = config.jwt.expiration_minutes,
        allowed_origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl()?,
    ));
    let catalog = Arc::new(Catalog::builtin()?);

    let (account_service, book_service) = build_services(&config, &authenticator).await?;

    let state = AppState {
        account_service,
        book_service,
        authenticator,
        catalog,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );
    tracing::info!(path = SWAGGER_UI_PATH, "Api documentation served");

    let http_application = create_router(state, &config.cors.allowed_origins);
    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn build_services(
    config: &Config,
    authenticator: &Arc<Authenticator>,
) -> Result<(Arc<dyn AccountServicePort>, Arc<dyn BookServicePort>), anyhow::Error> {
    let Some(database_url) = config.database.url.as_deref() else {
        tracing::warn!("No database url configured, records are kept in memory only");
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let books = Arc::new(InMemoryBookRepository::new());
        return Ok((
            Arc::new(AccountService::new(accounts, Arc::clone(authenticator))),
            Arc::new(BookService::new(books)),
        ));
    };

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let accounts = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let books = Arc::new(PostgresBookRepository::new(pg_pool));

    Ok((
        Arc::new(AccountService::new(accounts, Arc::clone(authenticator))),
        Arc::new(BookService::new(books)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
