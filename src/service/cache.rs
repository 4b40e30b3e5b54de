use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_millis(60_000);
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) >= self.ttl
    }
}

/// In-memory response cache with a TTL per entry.
pub struct ResponseCache<V> {
    entries: Arc<DashMap<String, CacheEntry<V>>>,
}

impl<V> Clone for ResponseCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V: Clone> ResponseCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Returns the value stored under `key` unless it has expired. Expired entries are removed.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let fresh = self
            .entries
            .get(key)
            .and_then(|entry| (!entry.is_expired(now)).then(|| entry.payload.clone()));

        if fresh.is_none() {
            // Only drop what is still stale, a concurrent writer may have refreshed the key
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }

        fresh
    }

    pub fn set(&self, key: impl Into<String>, payload: V) {
        self.set_with_ttl(key, payload, DEFAULT_TTL);
    }

    pub fn set_with_ttl(&self, key: impl Into<String>, payload: V, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                payload,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }
}

impl<V: Clone + Send + Sync + 'static> ResponseCache<V> {
    /// Sweeps expired entries every `period`, so keys that are never read again don't pile up.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = cache.sweep_expired();
                if evicted > 0 {
                    debug!(evicted, remaining = cache.len(), "swept response cache");
                }
            }
        })
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn value_is_served_until_ttl_elapses() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("player:NA1:abc", "payload".to_string(), Duration::from_secs(5));

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert_eq!(cache.get("player:NA1:abc").as_deref(), Some("payload"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("player:NA1:abc"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn default_ttl_is_one_minute() {
        let cache = ResponseCache::new();
        cache.set("key", 7);

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("key"), Some(7));
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("key"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn set_overwrites_and_restarts_ttl() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("key", 1, Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set_with_ttl("key", 2, Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get("key"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_everything() {
        let cache = ResponseCache::new();
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_only_removes_expired_entries() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("short", 1, Duration::from_secs(1));
        cache.set_with_ttl("long", 2, Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_task_evicts_unread_keys() {
        let cache = ResponseCache::new();
        cache.set_with_ttl("written-once", 1, Duration::from_secs(1));
        let sweeper = cache.spawn_sweeper(SWEEP_INTERVAL);

        tokio::time::sleep(SWEEP_INTERVAL + Duration::from_millis(10)).await;
        assert!(cache.is_empty());

        sweeper.abort();
    }
}
