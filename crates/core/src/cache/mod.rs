//! Time-boxed in-memory cache for read-mostly API responses.
//!
//! Entries live for a fixed TTL (5 minutes by default). Expiry is checked on
//! read: a stale entry is removed by the `get` that finds it, nothing sweeps
//! the map in the background. Writes always overwrite.
//!
//! Timestamps use `tokio::time::Instant`, so a paused test clock drives
//! expiry deterministically.

pub mod keys;

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

/// Response cache keyed by a deterministic request key.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: Mutex::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the value stored under `key` if it is younger than the TTL.
    ///
    /// An entry aged exactly TTL or more is removed and `None` is returned.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(key)?;

        if entry.stored_at.elapsed() < self.ttl {
            tracing::debug!(key, "response cache hit");
            return Some(entry.value.clone());
        }

        entries.remove(key);
        tracing::debug!(key, "response cache entry expired");
        None
    }

    /// Store `value` under `key` stamped with the current time.
    pub async fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        tracing::debug!(key = %key, "response cache store");
        self.entries
            .lock()
            .await
            .insert(key, CacheEntry { value, stored_at: Instant::now() });
    }

    /// Drop one entry. Returns whether it was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.lock().await.remove(key).is_some()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        tracing::debug!(count = entries.len(), "response cache cleared");
        entries.clear();
    }

    /// Number of entries currently held, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_get_within_ttl() {
        let cache = ResponseCache::new();
        cache.set("product_42", json!({"name": "Shirt"})).await;

        assert_eq!(cache.get("product_42").await, Some(json!({"name": "Shirt"})));

        tokio::time::advance(DEFAULT_TTL - Duration::from_millis(1)).await;
        assert_eq!(cache.get("product_42").await, Some(json!({"name": "Shirt"})));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_ttl() {
        let cache = ResponseCache::new();
        cache.set("product_42", json!({"name": "Shirt"})).await;

        tokio::time::advance(DEFAULT_TTL + Duration::from_millis(1)).await;
        assert_eq!(cache.get("product_42").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_at_exactly_ttl() {
        let cache = ResponseCache::new();
        cache.set("categories", json!([])).await;

        tokio::time::advance(DEFAULT_TTL).await;
        assert_eq!(cache.get("categories").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_kept_until_read() {
        let cache = ResponseCache::new();
        cache.set("a", json!(1)).await;
        cache.set("b", json!(2)).await;

        tokio::time::advance(DEFAULT_TTL * 2).await;
        assert_eq!(cache.len().await, 2);

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_overwrites_and_restamps() {
        let cache = ResponseCache::new();
        cache.set("k", json!("v1")).await;

        tokio::time::advance(Duration::from_secs(200)).await;
        cache.set("k", json!("v2")).await;

        tokio::time::advance(Duration::from_secs(200)).await;
        assert_eq!(cache.get("k").await, Some(json!("v2")));
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let cache = ResponseCache::new();
        cache.set("a", json!(1)).await;
        cache.set("b", json!(2)).await;

        assert!(cache.invalidate("a").await);
        assert!(!cache.invalidate("a").await);
        assert_eq!(cache.get("b").await, Some(json!(2)));

        cache.clear().await;
        assert_eq!(cache.get("b").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_ttl() {
        let cache = ResponseCache::with_ttl(Duration::from_secs(1));
        assert_eq!(cache.ttl(), Duration::from_secs(1));
        cache.set("k", json!(true)).await;

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);
    }
}
