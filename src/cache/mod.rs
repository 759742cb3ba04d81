//! Cache module - policy-keyed cache regions and the registry that owns them.
//!
//! ## Architecture
//!
//! - `PolicyCache` / `Disposable` - what the registry needs from a region
//! - `RegionCache` - Moka-backed region built from a `CachePolicy`
//! - `PolicedCacheDictionary` - concurrent key -> region registry with
//!   lazy creation, targeted and bulk invalidation, and teardown
//!
//! ## Usage
//!
//! ```rust
//! use policache::cache::{CachePolicy, PolicedCacheDictionary, RegionCache};
//!
//! let by_type = PolicedCacheDictionary::new("content_types", |id: &i32| {
//!     Ok(RegionCache::<String, String>::new(format!("content_type:{id}"), &CachePolicy::content()))
//! });
//!
//! let region = by_type.get_or_create(&1042).unwrap();
//! region.insert("home".to_string(), "<h1>Home</h1>".to_string());
//!
//! // Content of type 1042 was saved somewhere else.
//! by_type.clear_cache(&1042);
//! ```

mod config;
mod dictionary;
mod policy;
mod region;

pub use config::CachePolicy;
pub use dictionary::{CacheFactory, PolicedCacheDictionary, RegistryStatsSnapshot};
pub use policy::{Disposable, PolicyCache, dispose_if_disposable};
pub use region::RegionCache;
