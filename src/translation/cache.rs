//! Bounded memo for translation results

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Exact-string LRU cache, safe to share between request threads
///
/// Lookups refresh recency; when full, inserting evicts the least recently
/// used entry.
pub struct TranslationCache {
    entries: Mutex<LruCache<String, String>>,
}

impl TranslationCache {
    /// Cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.lock().put(key.into(), value.into());
    }

    /// Membership check that does not touch recency
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_and_insert() {
        let cache = TranslationCache::new(4);
        assert!(cache.get("fever").is_none());

        cache.insert("fever", "జ్వరం");
        assert_eq!(cache.get("fever").as_deref(), Some("జ్వరం"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = TranslationCache::new(2);
        cache.insert("a", "1");
        cache.insert("b", "2");

        // Touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").is_some());
        cache.insert("c", "3");

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = TranslationCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_keys_are_exact() {
        let cache = TranslationCache::new(4);
        cache.insert("Fever", "x");
        assert!(cache.get("fever").is_none());
        assert!(cache.get("Fever ").is_none());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(TranslationCache::new(256));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("k{}", (t * 100 + i) % 300);
                        cache.insert(key.clone(), key.clone());
                        if let Some(v) = cache.get(&key) {
                            assert_eq!(v, key);
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(cache.len() <= 256);
    }
}
