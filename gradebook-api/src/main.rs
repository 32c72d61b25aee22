//! # Gradebook API Server
//!
//! HTTP service for user accounts and student academic records.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/gradebook cargo run -p gradebook-api
//! STORAGE_BACKEND=memory cargo run -p gradebook-api
//! ```

use anyhow::Context;
use gradebook_api::{
    app::{build_router, AppState},
    config::{Config, StorageBackend},
};
use gradebook_shared::{
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, Store},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gradebook_api=debug,gradebook_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Gradebook API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let (store, pool) = open_store(&config).await?;
    tracing::info!(backend = store.backend(), "Storage ready");

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the configured backend, returning the pool when there is one so it
/// can be closed on shutdown
async fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn Store>, Option<PgPool>)> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on exit");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            Ok((store, None))
        }
        StorageBackend::Postgres => {
            let url = config
                .storage
                .database_url
                .clone()
                .context("DATABASE_URL is required for the postgres backend")?;

            let storage = &config.storage;
            let pool = create_pool(DatabaseConfig {
                url,
                max_connections: storage.max_connections,
                min_connections: storage.min_connections,
                acquire_timeout_seconds: storage.acquire_timeout_seconds,
                idle_timeout_seconds: storage.idle_timeout_seconds,
                max_lifetime_seconds: storage.max_lifetime_seconds,
            })
            .await
            .context("Failed to connect to PostgreSQL")?;

            run_migrations(&pool).await.context("Failed to run migrations")?;

            let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));
            Ok((store, Some(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
