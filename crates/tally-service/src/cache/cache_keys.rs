//! Cache key generators for consistent key naming.
//!
//! Keys are derived from the literal query strings, not from resolved
//! instants, so two spellings of the same window never share an entry.

/// Prefix for all report cache keys.
const CACHE_PREFIX: &str = "tally:txn";

/// Key for a cached listing over a date window.
#[must_use]
pub fn list_window(start_at: &str, end_at: &str) -> String {
    format!("{}:list:{}:{}", CACHE_PREFIX, start_at, end_at)
}

/// Key for a cached overview over a date window.
#[must_use]
pub fn overview_window(start_at: &str, end_at: &str) -> String {
    format!("{}:overview:{}:{}", CACHE_PREFIX, start_at, end_at)
}

/// Pattern matching every report cache entry.
#[must_use]
pub fn invalidation_pattern() -> String {
    format!("{}:*", CACHE_PREFIX)
}
