//! Timed cache for market data responses

use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for a market data request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Symbol, coin id or currency pair
    pub symbol: String,
    /// Which gateway endpoint produced the value
    pub endpoint: String,
}

impl CacheKey {
    pub fn new(symbol: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Thread-safe timed cache for quote data
pub struct PriceCache {
    inner: Arc<RwLock<TimedCache<CacheKey, serde_json::Value>>>,
}

impl PriceCache {
    /// Create a cache whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a cached value
    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut cache = self.inner.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value
    pub async fn insert(&self, key: CacheKey, value: serde_json::Value) {
        let mut cache = self.inner.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Return the cached value for `key`, or run `fetcher` and cache its
    /// result
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> std::result::Result<serde_json::Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<serde_json::Value, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!(?key, "cache hit");
            return Ok(value);
        }
        tracing::debug!(?key, "cache miss");

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let cache = self.inner.read().await;
        cache.cache_size()
    }

    /// Whether the cache currently holds no entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for PriceCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
