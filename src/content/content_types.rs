//! Per-content-type cache regions.

use std::sync::Arc;

use crate::cache::{CachePolicy, PolicedCacheDictionary, RegionCache, RegistryStatsSnapshot};
use crate::error::RegistryError;

/// Published content of one type, keyed by content id.
pub type ContentRegion = RegionCache<i64, String>;

/// One region per content type id, created on first request.
pub struct ContentTypeCaches {
    regions: PolicedCacheDictionary<i32, ContentRegion>,
}

impl ContentTypeCaches {
    pub fn new(policy: CachePolicy) -> Self {
        let regions = PolicedCacheDictionary::new("content_types", move |id: &i32| {
            anyhow::ensure!(*id > 0, "content type id must be positive, got {id}");
            Ok(RegionCache::new(format!("content_type:{id}"), &policy))
        });
        Self { regions }
    }

    pub fn region(&self, content_type_id: i32) -> Result<Arc<ContentRegion>, RegistryError> {
        self.regions.get_or_create(&content_type_id)
    }

    /// Empty the region if it exists.
    pub fn clear_type(&self, content_type_id: i32) -> bool {
        self.regions.clear_cache(&content_type_id)
    }

    /// Drop just one item from the type's region.
    ///
    /// Returns `true` only if the item was cached.
    pub fn evict(&self, content_type_id: i32, content_id: i64) -> bool {
        match self.regions.try_get(&content_type_id) {
            Some(region) if region.contains(&content_id) => {
                region.invalidate(&content_id);
                true
            }
            _ => false,
        }
    }

    /// Drop the region entirely (the type's schema changed).
    pub fn remove_type(&self, content_type_id: i32) -> bool {
        self.regions.remove(&content_type_id)
    }

    pub fn registry(&self) -> &PolicedCacheDictionary<i32, ContentRegion> {
        &self.regions
    }

    pub fn stats(&self) -> RegistryStatsSnapshot {
        self.regions.stats()
    }
}
