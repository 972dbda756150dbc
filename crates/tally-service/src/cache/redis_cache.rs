//! Redis-based cache implementation.

use super::Cache;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use std::time::Duration;
use tally_core::{TallyError, TallyResult};
use tracing::debug;

/// TTL for cached report payloads (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> TallyResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| TallyError::Cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(TallyError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl Cache for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> TallyResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| TallyError::Cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TallyResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| TallyError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> TallyResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;

        // Use KEYS to find matching keys (SCAN would be better for production)
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| TallyError::Cache(format!("Failed to scan keys: {}", e)))?;

        if keys.is_empty() {
            return Ok(0);
        }

        // Delete all matching keys
        let deleted: i64 = conn
            .del(&keys)
            .await
            .map_err(|e| TallyError::Cache(format!("Failed to delete keys: {}", e)))?;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cache_reports_disabled() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_reads_nothing_and_swallows_writes() {
        let cache = RedisCacheService::disabled();

        assert!(cache.get_raw("tally:txn:list:a:b").await.unwrap().is_none());
        cache
            .set_raw("tally:txn:list:a:b", "[]", DEFAULT_TTL)
            .await
            .unwrap();
        assert_eq!(cache.delete_pattern("tally:txn:*").await.unwrap(), 0);
    }
}
