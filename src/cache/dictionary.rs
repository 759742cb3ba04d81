//! Policed cache dictionary - a registry of independently managed regions.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::policy::{PolicyCache, dispose_if_disposable};
use crate::error::RegistryError;

/// Builds a fresh region for a key.
pub type CacheFactory<K, C> = dyn Fn(&K) -> anyhow::Result<C> + Send + Sync;

/// Registry mapping a key (culture, content type id, ...) to a lazily
/// created cache region.
///
/// Regions are stored in a sharded [`DashMap`], so creating or clearing
/// one region never serializes unrelated regions behind a global lock.
///
/// Lifecycle rules:
/// - At most one region per key is ever handed out. When two callers race
///   on an absent key, the first insert wins and the loser's region is
///   disposed before the winner is returned to it.
/// - `remove` / `remove_all` dispose what they detach.
/// - `dispose` (also run on drop) tears down every region exactly once.
///   Afterwards `get_or_create` fails with [`RegistryError::Disposed`],
///   `try_get` returns `None`, and invalidation calls do nothing.
///
/// Handles are `Arc`s; callers should re-fetch them rather than keep
/// them past an invalidation, since a removed region is already disposed.
///
/// ## Example
///
/// ```rust
/// use policache::cache::{CachePolicy, PolicedCacheDictionary, RegionCache};
///
/// let cultures = PolicedCacheDictionary::new("cultures", |culture: &String| {
///     Ok(RegionCache::<String, String>::new(culture.as_str(), &CachePolicy::culture()))
/// });
///
/// let en = cultures.get_or_create(&"en-US".to_string()).unwrap();
/// en.insert("greeting".to_string(), "Hello".to_string());
///
/// cultures.clear_cache(&"en-US".to_string());
/// assert_eq!(en.get(&"greeting".to_string()), None);
/// ```
pub struct PolicedCacheDictionary<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    C: PolicyCache + 'static,
{
    name: Arc<str>,
    caches: DashMap<K, Arc<C>>,
    factory: Box<CacheFactory<K, C>>,
    disposed: AtomicBool,
    stats: RegistryStats,
}

/// Lifetime counters for a registry.
#[derive(Debug, Default)]
struct RegistryStats {
    created: AtomicU64,
    discarded: AtomicU64,
    removed: AtomicU64,
    factory_failures: AtomicU64,
}

/// Point-in-time view of a registry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegistryStatsSnapshot {
    pub name: String,
    pub regions: usize,
    pub entries: u64,
    pub created: u64,
    /// Regions built by callers that lost a creation race.
    pub discarded: u64,
    pub removed: u64,
    pub factory_failures: u64,
    pub disposed: bool,
}

impl<K, C> PolicedCacheDictionary<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    C: PolicyCache + 'static,
{
    /// Create an empty registry that builds regions with `factory`.
    pub fn new<F>(name: impl Into<Arc<str>>, factory: F) -> Self
    where
        F: Fn(&K) -> anyhow::Result<C> + Send + Sync + 'static,
    {
        let name = name.into();
        info!("Cache registry '{}' initialized", name);
        Self {
            name,
            caches: DashMap::new(),
            factory: Box::new(factory),
            disposed: AtomicBool::new(false),
            stats: RegistryStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the region for `key`, creating it with the factory if needed.
    ///
    /// Concurrent callers on the same absent key all receive the same
    /// instance. The factory runs outside any shard lock and may run more
    /// than once under contention; surplus instances are disposed.
    pub fn get_or_create(&self, key: &K) -> Result<Arc<C>, RegistryError> {
        self.ensure_active()?;

        if let Some(existing) = self.caches.get(key) {
            return Ok(Arc::clone(existing.value()));
        }

        let created = (self.factory)(key).map_err(|source| {
            self.stats.factory_failures.fetch_add(1, Ordering::Relaxed);
            warn!("Cache factory for '{}' failed on key {:?}", self.name, key);
            RegistryError::Factory {
                key: format!("{key:?}"),
                source,
            }
        })?;
        let created = Arc::new(created);

        let inserted = match self.caches.entry(key.clone()) {
            Entry::Occupied(entry) => Err(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&created));
                Ok(Arc::clone(&created))
            }
        };

        let handle = match inserted {
            Ok(handle) => handle,
            Err(winner) => {
                self.stats.discarded.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Lost creation race for {:?} in '{}', discarding duplicate region",
                    key, self.name
                );
                dispose_if_disposable(created.as_ref());
                return Ok(winner);
            }
        };

        self.stats.created.fetch_add(1, Ordering::Relaxed);

        // A dispose that began after our check may have swept the map
        // before this insert landed.
        if self.is_disposed() {
            if self
                .caches
                .remove_if(key, |_, current| Arc::ptr_eq(current, &handle))
                .is_some()
            {
                dispose_if_disposable(handle.as_ref());
            }
            return Err(self.disposed_error());
        }

        debug!("Created region {:?} in '{}'", key, self.name);
        Ok(handle)
    }

    /// Look up a region without creating it.
    pub fn try_get(&self, key: &K) -> Option<Arc<C>> {
        self.caches.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a region exists for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.caches.contains_key(key)
    }

    /// Detach and dispose the region for `key`.
    ///
    /// Returns `true` if a region was removed.
    pub fn remove(&self, key: &K) -> bool {
        match self.caches.remove(key) {
            Some((_, handle)) => {
                self.stats.removed.fetch_add(1, Ordering::Relaxed);
                dispose_if_disposable(handle.as_ref());
                debug!("Removed region {:?} from '{}'", key, self.name);
                true
            }
            None => false,
        }
    }

    /// Detach and dispose every region.
    ///
    /// Regions inserted while the sweep runs may or may not survive it.
    /// Returns the number of regions removed.
    pub fn remove_all(&self) -> usize {
        let drained = self.drain();
        self.stats
            .removed
            .fetch_add(drained.len() as u64, Ordering::Relaxed);
        for handle in &drained {
            dispose_if_disposable(handle.as_ref());
        }
        debug!("Removed {} regions from '{}'", drained.len(), self.name);
        drained.len()
    }

    /// Empty the region for `key`, keeping it registered.
    ///
    /// Never creates a region. Returns `true` if one was found.
    pub fn clear_cache(&self, key: &K) -> bool {
        match self.try_get(key) {
            Some(handle) => {
                handle.clear();
                true
            }
            None => false,
        }
    }

    /// Empty every registered region without removing any.
    ///
    /// Returns the number of regions cleared.
    pub fn clear_all_caches(&self) -> usize {
        let handles: Vec<Arc<C>> = self
            .caches
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        for handle in &handles {
            handle.clear();
        }
        debug!("Cleared {} regions in '{}'", handles.len(), self.name);
        handles.len()
    }

    /// Dispose every region and move the registry to its terminal state.
    ///
    /// Only the first call does anything.
    pub fn dispose(&self) {
        if self
            .disposed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let drained = self.drain();
        for handle in &drained {
            dispose_if_disposable(handle.as_ref());
        }
        info!(
            "Cache registry '{}' disposed ({} regions released)",
            self.name,
            drained.len()
        );
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Get the number of registered regions.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Get a list of all registered keys.
    pub fn keys(&self) -> Vec<K> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn stats(&self) -> RegistryStatsSnapshot {
        let handles: Vec<Arc<C>> = self
            .caches
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        RegistryStatsSnapshot {
            name: self.name.to_string(),
            regions: handles.len(),
            entries: handles.iter().map(|handle| handle.entry_count()).sum(),
            created: self.stats.created.load(Ordering::Relaxed),
            discarded: self.stats.discarded.load(Ordering::Relaxed),
            removed: self.stats.removed.load(Ordering::Relaxed),
            factory_failures: self.stats.factory_failures.load(Ordering::Relaxed),
            disposed: self.is_disposed(),
        }
    }

    fn ensure_active(&self) -> Result<(), RegistryError> {
        if self.is_disposed() {
            warn!("Cache registry '{}' used after dispose", self.name);
            return Err(self.disposed_error());
        }
        Ok(())
    }

    fn disposed_error(&self) -> RegistryError {
        RegistryError::Disposed {
            registry: self.name.to_string(),
        }
    }

    /// Detach every region currently visible. Disposal is left to the caller
    /// so no user code runs under a shard lock.
    fn drain(&self) -> Vec<Arc<C>> {
        let keys = self.keys();
        keys.iter()
            .filter_map(|key| self.caches.remove(key).map(|(_, handle)| handle))
            .collect()
    }
}

impl<K, C> Drop for PolicedCacheDictionary<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    C: PolicyCache + 'static,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<K, C> fmt::Debug for PolicedCacheDictionary<K, C>
where
    K: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static,
    C: PolicyCache + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicedCacheDictionary")
            .field("name", &self.name)
            .field("region_count", &self.caches.len())
            .field("keys", &self.keys())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
