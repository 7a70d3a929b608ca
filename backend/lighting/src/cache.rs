//! Per-node memoization of generated prompts.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use relight_core::{LightingParameters, PromptResult};

/// Default number of node ids retained.
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Key used when the host supplies no node id.
pub const DEFAULT_CACHE_KEY: &str = "default";

/// Snapshot of one evaluation: its inputs and what they produced.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub params: LightingParameters,
    pub image_fingerprint: Option<String>,
    pub result: Arc<PromptResult>,
}

impl CacheEntry {
    /// Exact match on every parameter and on the image fingerprint.
    pub fn matches(&self, params: &LightingParameters, image_fingerprint: Option<&str>) -> bool {
        self.params == *params && self.image_fingerprint.as_deref() == image_fingerprint
    }
}

/// Storage for cache entries keyed by node id.
pub trait PromptCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Insert or overwrite the entry for `key`.
    fn put(&self, key: &str, entry: CacheEntry);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// Bounded cache that evicts the least-recently-used node id on overflow.
pub struct LruPromptCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl LruPromptCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        // Entries are plain data; a panic elsewhere cannot leave them half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for LruPromptCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PromptCache for LruPromptCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: &str, entry: CacheEntry) {
        self.lock().put(key.to_string(), entry);
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
