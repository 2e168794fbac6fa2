//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, service wiring, and the Axum server lifecycle.

use crate::application::services::{LinkService, LinkServiceOptions};
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::LinkStore;
use crate::infrastructure::persistence::{MemoryLinkStore, PgLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before startup gives up on the store.
const CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured link store (memory, PostgreSQL or Redis)
/// - The link service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be reached after retries
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let options = LinkServiceOptions {
        code_max_attempts: config.code_max_attempts,
        store_timeout: config.store_timeout(),
    };
    let link_service = Arc::new(LinkService::new(store, options));

    let state = AppState::new(
        link_service,
        config.base_url.clone(),
        config.not_found_url.clone(),
        config.validate_url_syntax,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects the store selected by `STORE_BACKEND`.
///
/// Network backends are retried with exponential backoff; the PostgreSQL
/// table is created if missing.
///
/// # Errors
///
/// Returns an error if the backend stays unreachable after
/// [`CONNECT_ATTEMPTS`] attempts or its connection URL is missing.
pub async fn build_store(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let store: Arc<dyn LinkStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory link store; links are lost on restart");
            Arc::new(MemoryLinkStore::new())
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;

            let max_connections = config.db_max_connections;
            let acquire_timeout = Duration::from_secs(config.db_connect_timeout);

            let pool = with_retry("PostgreSQL", move || async move {
                PgPoolOptions::new()
                    .max_connections(max_connections)
                    .acquire_timeout(acquire_timeout)
                    .connect(database_url)
                    .await
            })
            .await
            .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            let store = PgLinkStore::new(Arc::new(pool), &config.table_name);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        StoreBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis backend")?;

            let namespace = config.table_name.as_str();

            let store = with_retry("Redis", move || RedisLinkStore::connect(redis_url, namespace))
            .await
            .context("Failed to connect to Redis")?;
            Arc::new(store)
        }
    };

    Ok(store)
}

async fn with_retry<T, E, F, Fut>(name: &str, mut connect: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .factor(20)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    Retry::start(strategy, || {
        let attempt = connect();
        async move {
            let result = attempt.await;
            if let Err(ref e) = result {
                tracing::warn!("{} connection failed: {}", name, e);
            }
            result
        }
    })
    .await
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
