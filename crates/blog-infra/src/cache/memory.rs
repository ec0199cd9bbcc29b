//! In-memory cache holding flash state between a redirect and the next page.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now > exp)
    }
}

/// In-memory cache using a HashMap behind an async RwLock.
///
/// Data is lost on process restart. Expired entries are dropped lazily on
/// read and swept on every write.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if entry.is_expired(Instant::now()) {
            drop(store);
            self.store.write().await.remove(key);
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let now = Instant::now();
        let mut store = self.store.write().await;

        // Abandoned flashes would otherwise accumulate forever.
        store.retain(|_, entry| !entry.is_expired(now));

        store.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: ttl.map(|d| now + d),
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }

    /// Removes under one write lock, so concurrent takes of the same key
    /// see the value at most once.
    async fn take(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entry = self.store.write().await.remove(key);
        Ok(entry
            .filter(|e| !e.is_expired(Instant::now()))
            .map(|e| e.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();
        cache.set("key1", "value1", None).await.unwrap();
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_take_consumes_entry() {
        let cache = InMemoryCache::new();
        cache.set("flash:1", "{}", None).await.unwrap();

        assert_eq!(cache.take("flash:1").await.unwrap(), Some("{}".to_string()));
        assert_eq!(cache.take("flash:1").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_takes_consume_once() {
        let cache = Arc::new(InMemoryCache::new());
        cache.set("flash:race", "{}", None).await.unwrap();

        let takers: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.take("flash:race").await.unwrap() })
            })
            .collect();

        let mut seen = 0;
        for taker in takers {
            if taker.await.unwrap().is_some() {
                seen += 1;
            }
        }
        assert_eq!(seen, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let cache = InMemoryCache::new();
        cache
            .set("short", "v", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.take("short").await.unwrap(), None);
    }
}
