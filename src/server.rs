//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, identifier seeding, and the Axum
//! server lifecycle.

use crate::application::services::ShortUrlService;
use crate::config::Config;
use crate::domain::id_generator::build_id_generator;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::dns::SystemResolver;
use crate::infrastructure::persistence::PgShortUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the connection pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database cannot be reached within
/// `DB_CONNECT_TIMEOUT`.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool
/// - Migrations
/// - Identifier generator (seeded from stored data)
/// - Axum HTTP server
///
/// Nothing is served until every step has succeeded.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The identifier generator cannot be seeded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let repository: Arc<dyn ShortUrlRepository> =
        Arc::new(PgShortUrlRepository::new(Arc::new(pool)));

    let id_generator = build_id_generator(config.id_strategy, repository.clone())
        .await
        .context("Failed to initialize identifier generator")?;
    tracing::info!(strategy = %config.id_strategy, "Identifier generator ready");

    let resolver = Arc::new(SystemResolver::new(config.dns_timeout()));

    let service = Arc::new(ShortUrlService::new(repository, id_generator, resolver));
    let state = AppState::new(service, config.legacy_status_codes);

    let app = app_router(state, &config.public_dir, config.request_timeout());

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
