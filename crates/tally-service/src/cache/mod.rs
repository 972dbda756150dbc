//! Caching infrastructure for the service layer.
//!
//! Report payloads (listings and overviews) are cached in Redis under a
//! shared namespace; every write to the ledger flushes the whole
//! namespace rather than tracking which windows a record falls into.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{Cache, CacheExt};
pub use redis_cache::{RedisCacheService, DEFAULT_TTL};
