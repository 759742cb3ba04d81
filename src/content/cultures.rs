//! Per-culture cache regions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::{CachePolicy, PolicedCacheDictionary, RegionCache, RegistryStatsSnapshot};
use crate::error::RegistryError;

/// Culture code such as `en-US`, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CultureCode(String);

impl CultureCode {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CultureCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<&str> for CultureCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<CultureCode> for String {
    fn from(code: CultureCode) -> Self {
        code.0
    }
}

impl fmt::Display for CultureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Localized values (dictionary items, rendered fragments) for one culture.
pub type CultureRegion = RegionCache<String, String>;

/// One region per culture, created on first request.
pub struct CultureCaches {
    regions: PolicedCacheDictionary<CultureCode, CultureRegion>,
}

impl CultureCaches {
    pub fn new(policy: CachePolicy) -> Self {
        let regions = PolicedCacheDictionary::new("cultures", move |culture: &CultureCode| {
            Ok(RegionCache::new(format!("culture:{culture}"), &policy))
        });
        Self { regions }
    }

    /// Region for `culture`, created if this is the first request for it.
    pub fn region(&self, culture: impl Into<CultureCode>) -> Result<Arc<CultureRegion>, RegistryError> {
        self.regions.get_or_create(&culture.into())
    }

    /// Empty the culture's region if it was ever requested.
    pub fn clear_culture(&self, culture: impl Into<CultureCode>) -> bool {
        self.regions.clear_cache(&culture.into())
    }

    /// Drop the culture's region entirely (culture removed from the site).
    pub fn remove_culture(&self, culture: impl Into<CultureCode>) -> bool {
        self.regions.remove(&culture.into())
    }

    pub fn registry(&self) -> &PolicedCacheDictionary<CultureCode, CultureRegion> {
        &self.regions
    }

    pub fn stats(&self) -> RegistryStatsSnapshot {
        self.regions.stats()
    }
}
