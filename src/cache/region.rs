//! Named cache region backed by Moka.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tracing::debug;

use super::CachePolicy;
use super::policy::{Disposable, PolicyCache};

/// A typed cache region that provides a clean API over Moka.
///
/// This region is:
/// - Thread-safe (uses Arc internally)
/// - LRU-based with optional TTL/TTI
/// - Clone-friendly (clones share the same entries and lifecycle)
///
/// Once disposed, writes are dropped and reads miss.
pub struct RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Cache<K, V>>,
    name: Arc<str>,
    created_at: DateTime<Utc>,
    disposed: Arc<AtomicBool>,
}

// Manual Clone implementation that doesn't require K: Clone, V: Clone
impl<K, V> Clone for RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
            created_at: self.created_at,
            disposed: Arc::clone(&self.disposed),
        }
    }
}

impl<K, V> RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a new region with the given name and policy.
    pub fn new(name: impl Into<Arc<str>>, policy: &CachePolicy) -> Self {
        let mut builder = Cache::builder().max_capacity(policy.max_capacity);

        if let Some(ttl) = policy.ttl {
            builder = builder.time_to_live(ttl);
        }

        if let Some(tti) = policy.tti {
            builder = builder.time_to_idle(tti);
        }

        Self {
            inner: Arc::new(builder.build()),
            name: name.into(),
            created_at: Utc::now(),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Insert a key-value pair. Ignored after disposal.
    pub fn insert(&self, key: K, value: V) {
        if self.is_disposed() {
            debug!("Dropping write to disposed region '{}'", self.name);
            return;
        }
        self.inner.insert(key, value);
    }

    /// Get a value from the region.
    ///
    /// Returns `Some(value)` if the key exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        if self.is_disposed() {
            return None;
        }
        self.inner.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        !self.is_disposed() && self.inner.contains_key(key)
    }

    /// Remove a single key.
    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }

    /// Get or insert a value using a closure.
    ///
    /// After disposal the value is computed but not stored.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
        K: Clone,
    {
        if self.is_disposed() {
            return f();
        }
        self.inner.get_with(key, f)
    }

    /// Get or try to insert a value using a fallible closure.
    ///
    /// Returns `Err(e)` if the closure fails; nothing is stored in that case.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, f: F) -> Result<V, Arc<E>>
    where
        F: FnOnce() -> Result<V, E>,
        E: Send + Sync + 'static,
        K: Clone,
    {
        if self.is_disposed() {
            return f().map_err(Arc::new);
        }
        self.inner.try_get_with(key, f)
    }

    /// Flush Moka's pending maintenance so `entry_count` is exact.
    pub fn sync(&self) {
        self.inner.run_pending_tasks();
    }
}

impl<K, V> PolicyCache for RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clear(&self) {
        self.inner.invalidate_all();
        debug!("Cleared region '{}'", self.name);
    }

    /// Note: This may not be perfectly accurate due to concurrent operations.
    fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<K, V> Disposable for RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
        debug!("Disposed region '{}'", self.name);
    }
}

impl<K, V> fmt::Debug for RegionCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::dispose_if_disposable;

    fn region() -> RegionCache<String, u32> {
        RegionCache::new("test", &CachePolicy::default())
    }

    #[test]
    fn test_insert_and_get() {
        let cache = region();
        cache.insert("a".to_string(), 1);

        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert!(cache.contains(&"a".to_string()));
        assert_eq!(cache.name(), "test");
    }

    #[test]
    fn test_clear_keeps_region_usable() {
        let cache = region();
        cache.insert("a".to_string(), 1);
        PolicyCache::clear(&cache);

        assert_eq!(cache.get(&"a".to_string()), None);
        cache.insert("b".to_string(), 2);
        assert_eq!(cache.get(&"b".to_string()), Some(2));
    }

    #[test]
    fn test_dispose_drops_entries_and_writes() {
        let cache = region();
        let clone = cache.clone();
        cache.insert("a".to_string(), 1);

        dispose_if_disposable(&cache);
        assert!(clone.is_disposed());
        assert_eq!(clone.get(&"a".to_string()), None);

        clone.insert("b".to_string(), 2);
        assert!(!cache.contains(&"b".to_string()));
        assert_eq!(cache.get_or_insert_with("c".to_string(), || 3), 3);
        assert_eq!(cache.get(&"c".to_string()), None);
    }

    #[test]
    fn test_entry_count_after_sync() {
        let before = Utc::now();
        let cache = region();
        assert!(cache.created_at() >= before && cache.created_at() <= Utc::now());

        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.sync();
        assert_eq!(cache.entry_count(), 2);

        PolicyCache::clear(&cache);
        cache.sync();
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_try_insert_failure_stores_nothing() {
        let cache = region();
        let result: Result<u32, Arc<&str>> =
            cache.get_or_try_insert_with("a".to_string(), || Err("boom"));

        assert!(result.is_err());
        assert!(!cache.contains(&"a".to_string()));
    }
}
