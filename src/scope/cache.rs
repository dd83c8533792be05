//! Bounded LRU cache of rendered previews

use std::num::NonZeroUsize;

use lru::LruCache;

/// Capacity used when none is configured
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Raw preview input → rendered text, least recently used evicted first
#[derive(Debug)]
pub struct PreviewCache {
    entries: LruCache<String, String>,
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PreviewCache {
    /// A capacity of zero is treated as one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Look up `key` and mark it most recently used
    pub fn get(&mut self, key: &str) -> Option<&String> {
        self.entries.get(key)
    }

    /// Look up `key` without touching recency
    pub fn peek(&self, key: &str) -> Option<&String> {
        self.entries.peek(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    /// Insert or replace `key` as most recently used, evicting if full
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.entries.contains(&key) && self.entries.len() == self.capacity() {
            tracing::trace!(cap = self.capacity(), "Preview cache full, evicting oldest");
        }
        self.entries.put(key, value.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}
