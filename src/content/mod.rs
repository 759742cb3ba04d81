//! Content caches - culture and content-type registries plus the
//! invalidation flow that keeps them fresh.
//!
//! The manager is created once at startup, shared by `Arc`, and disposed
//! at shutdown. Invalidation only touches regions that already exist.

mod content_types;
mod cultures;
mod events;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::RegistryStatsSnapshot;
use crate::config::Config;

pub use content_types::{ContentRegion, ContentTypeCaches};
pub use cultures::{CultureCaches, CultureCode, CultureRegion};
pub use events::{InvalidationEvent, InvalidationOutcome};

/// Owner of every content-facing cache registry.
pub struct ContentCacheManager {
    cultures: Arc<CultureCaches>,
    content_types: Arc<ContentTypeCaches>,
}

/// Stats for both registries.
#[derive(Debug, Clone, Serialize)]
pub struct ContentCacheStats {
    pub cultures: RegistryStatsSnapshot,
    pub content_types: RegistryStatsSnapshot,
}

impl ContentCacheManager {
    pub fn new(config: &Config) -> Self {
        Self {
            cultures: Arc::new(CultureCaches::new(config.culture_policy.clone())),
            content_types: Arc::new(ContentTypeCaches::new(config.content_type_policy.clone())),
        }
    }

    /// Pre-create regions for the configured cultures.
    pub fn warm(&self, cultures: &[String]) -> anyhow::Result<()> {
        for culture in cultures {
            self.cultures.region(culture.as_str())?;
        }
        info!("Warmed {} culture regions", cultures.len());
        Ok(())
    }

    pub fn cultures(&self) -> Arc<CultureCaches> {
        Arc::clone(&self.cultures)
    }

    pub fn content_types(&self) -> Arc<ContentTypeCaches> {
        Arc::clone(&self.content_types)
    }

    /// Apply an invalidation event.
    pub fn handle(&self, event: &InvalidationEvent) -> InvalidationOutcome {
        let mut outcome = InvalidationOutcome::default();

        match event {
            InvalidationEvent::ContentSaved {
                content_type_id,
                content_id,
                culture,
            } => {
                match content_id {
                    Some(id) => {
                        if self.content_types.evict(*content_type_id, *id) {
                            outcome.items_evicted += 1;
                        }
                    }
                    None => {
                        if self.content_types.clear_type(*content_type_id) {
                            outcome.regions_cleared += 1;
                        }
                    }
                }
                if let Some(culture) = culture
                    && self.cultures.clear_culture(culture.clone())
                {
                    outcome.regions_cleared += 1;
                }
            }
            InvalidationEvent::ContentTypeChanged { content_type_id } => {
                if self.content_types.remove_type(*content_type_id) {
                    outcome.regions_removed += 1;
                }
            }
            InvalidationEvent::CultureRemoved { culture } => {
                if self.cultures.remove_culture(culture.clone()) {
                    outcome.regions_removed += 1;
                }
            }
            InvalidationEvent::RefreshAll => {
                outcome.regions_cleared += self.cultures.registry().clear_all_caches();
                outcome.regions_cleared += self.content_types.registry().clear_all_caches();
            }
            InvalidationEvent::Rebuild => {
                outcome.regions_removed += self.cultures.registry().remove_all();
                outcome.regions_removed += self.content_types.registry().remove_all();
            }
        }

        debug!("Handled {:?}: {:?}", event, outcome);
        outcome
    }

    pub fn stats(&self) -> ContentCacheStats {
        ContentCacheStats {
            cultures: self.cultures.stats(),
            content_types: self.content_types.stats(),
        }
    }

    /// Tear down both registries. Safe to call more than once.
    pub fn dispose(&self) {
        self.cultures.registry().dispose();
        self.content_types.registry().dispose();
    }
}
