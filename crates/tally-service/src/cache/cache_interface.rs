//! Cache trait for abstracted caching operations.

use async_trait::async_trait;
use std::time::Duration;
use tally_core::TallyResult;

/// Cache abstraction for storing and retrieving report payloads.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> TallyResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> TallyResult<()>;

    /// Delete all keys matching a pattern.
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> TallyResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: Cache {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> TallyResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> TallyResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

// Blanket implementation for all Cache implementations
impl<T: Cache + ?Sized> CacheExt for T {}
