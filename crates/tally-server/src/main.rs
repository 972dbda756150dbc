//! # Tally Server
//!
//! Main entry point for the Tally HTTP service. Wires the shared database
//! and Redis pools into the service layer and serves the REST API.

use std::sync::Arc;

use tally_config::{ConfigLoader, ObservabilityConfig, RedisConfig};
use tally_core::{local_offset, TallyError, TallyResult};
use tally_repository::{create_pool, MySqlTransactionRepository};
use tally_rest::{create_router, AppState};
use tally_service::{RedisCacheService, TransactionServiceImpl};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Application error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> TallyResult<()> {
    // Configuration first; the logging filter and format come from it.
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get();

    init_logging(&config.observability);

    info!("Starting Tally server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    // Database pool, shared by every repository handle.
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Redis-backed report cache; a disabled cache degrades to direct reads.
    let cache = Arc::new(create_cache(&config.redis)?);

    let repository = Arc::new(MySqlTransactionRepository::new(db_pool));
    let offset = local_offset(config.time.utc_offset_hours)?;
    let service = Arc::new(TransactionServiceImpl::new(repository, cache, offset));

    let state = AppState::new(service);
    let router = create_router(state, &config);

    let addr = config.server.addr();
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TallyError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TallyError::Internal(format!("HTTP server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the Redis pool, or a no-op cache when Redis is disabled.
fn create_cache(config: &RedisConfig) -> TallyResult<RedisCacheService> {
    if !config.enabled {
        warn!("Redis caching is disabled; reports will hit the database every time");
        return Ok(RedisCacheService::disabled());
    }

    let url = config.effective_url()?;
    let mut redis_config = deadpool_redis::Config::from_url(url);
    redis_config.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));

    let pool = redis_config
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| TallyError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis connection pool created");
    Ok(RedisCacheService::new(Arc::new(pool)))
}

fn init_logging(config: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
