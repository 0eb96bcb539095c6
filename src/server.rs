//! HTTP server initialization and runtime setup.
//!
//! Selects the catalog store, connects the cache, spawns the telemetry worker
//! and runs the Axum server.

use crate::config::{CatalogStore, Config};
use crate::domain::repositories::{CatalogRepository, EventRepository, SubmissionRepository};
use crate::domain::telemetry::{ChannelTelemetrySink, TelemetrySink};
use crate::domain::telemetry_worker::run_telemetry_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    MemoryCatalogRepository, MemoryEventRepository, MemorySubmissionRepository,
    PgCatalogRepository, PgEventRepository, PgSubmissionRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

struct Stores {
    catalog: Arc<dyn CatalogRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    events: Arc<dyn EventRepository>,
}

/// Connects to PostgreSQL and applies migrations, or loads the seed snapshot
/// into the in-memory store.
async fn open_stores(config: &Config) -> Result<Stores> {
    let database_url = match &config.store {
        CatalogStore::Postgres { url } => url,
        CatalogStore::Seed { path } => {
            let catalog = MemoryCatalogRepository::from_seed_file(path)?;
            tracing::warn!("No database configured; submissions and events are kept in memory");

            return Ok(Stores {
                catalog: Arc::new(catalog),
                submissions: Arc::new(MemorySubmissionRepository::new()),
                events: Arc::new(MemoryEventRepository::new()),
            });
        }
    };

    let pool = config
        .pool
        .options()
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    Ok(Stores {
        catalog: Arc::new(PgCatalogRepository::new(pool.clone())),
        submissions: Arc::new(PgSubmissionRepository::new(pool.clone())),
        events: Arc::new(PgEventRepository::new(pool)),
    })
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the listener cannot bind,
/// or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let stores = open_stores(&config).await?;
    let cache = connect_cache(&config).await;

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    tokio::spawn(run_telemetry_worker(
        event_rx,
        stores.catalog.clone(),
        stores.events,
    ));
    tracing::info!("Telemetry worker started");

    let telemetry: Arc<dyn TelemetrySink> = Arc::new(ChannelTelemetrySink::new(event_tx));

    let state = AppState::new(
        stores.catalog,
        stores.submissions,
        cache,
        telemetry,
        config.directory.site_settings(),
        config.directory.search_threshold,
    );

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, config.behind_proxy));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
