use std::sync::Arc;

use blog_service::account::ports::AccountServicePort;
use blog_service::account::seed::demo_accounts;
use blog_service::account::service::AccountService;
use blog_service::config::Config;
use blog_service::config::SeedConfig;
use blog_service::domain::auth::gate::AuthGate;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::PostgresAccountRepository;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::post::service::PostService;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        seed_enabled = config.seed.enabled,
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

    let authenticator = Arc::new(config.authenticator()?);
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&account_repository),
        Arc::clone(&authenticator),
    ));
    let post_service = Arc::new(PostService::new(post_repository));
    let auth_gate = Arc::new(AuthGate::new(authenticator, account_repository));

    seed(account_service.as_ref(), &config.seed).await;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, post_service, auth_gate);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

/// Upsert the demo accounts. Failures are logged and never stop startup.
async fn seed(account_service: &impl AccountServicePort, config: &SeedConfig) {
    if !config.enabled {
        return;
    }

    let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) else {
        tracing::warn!("Seeding enabled without seed.password, skipping");
        return;
    };

    let result = match demo_accounts(password) {
        Ok(commands) => account_service.seed_accounts(commands).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(accounts) => tracing::info!(count = accounts.len(), "Demo accounts seeded"),
        Err(e) => tracing::error!(error = %e, "Seeding demo accounts failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
