//! In-memory TTL cache for rendered menus.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::application::render::Rendered;
use crate::infrastructure::traits::MenuCache;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Rendered,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Process-local cache; expired entries are evicted lazily on access.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn fresh(&self, key: &str) -> Option<Rendered> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_fresh(Instant::now()) => Some(entry.value.clone()),
            Some(_) => {
                trace!(key, "evicting expired cache entry");
                entries.remove(key);
                None
            }
            None => None,
        }
    }
}

impl MenuCache for MemoryCache {
    fn has(&self, key: &str) -> bool {
        self.fresh(key).is_some()
    }

    fn get(&self, key: &str) -> Option<Rendered> {
        self.fresh(key)
    }

    fn set(&self, key: &str, value: Rendered, ttl: Option<Duration>) {
        // A ttl past the clock's range never expires.
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.entries
            .lock()
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_entry_without_ttl_when_get_then_returns_value() {
        let cache = MemoryCache::new();
        cache.set("menu_default", Rendered::Text("x".into()), None);
        assert!(cache.has("menu_default"));
        assert_eq!(cache.get("menu_default"), Some(Rendered::Text("x".into())));
        assert!(!cache.has("menu_other"));
    }

    #[test]
    fn given_zero_ttl_when_get_then_entry_is_expired_and_evicted() {
        let cache = MemoryCache::new();
        cache.set("k", Rendered::Text("x".into()), Some(Duration::ZERO));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn given_unrepresentable_ttl_when_set_then_entry_never_expires() {
        let cache = MemoryCache::new();
        cache.set("k", Rendered::Text("x".into()), Some(Duration::MAX));
        assert_eq!(cache.get("k"), Some(Rendered::Text("x".into())));
    }

    #[test]
    fn given_long_ttl_when_overwritten_then_latest_value_wins() {
        let cache = MemoryCache::new();
        cache.set("k", Rendered::Text("a".into()), Some(Duration::from_secs(3600)));
        cache.set("k", Rendered::Text("b".into()), Some(Duration::from_secs(3600)));
        assert_eq!(cache.get("k"), Some(Rendered::Text("b".into())));
        assert_eq!(cache.len(), 1);
    }
}
