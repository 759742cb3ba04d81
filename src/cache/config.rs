//! Cache policy configuration.

use std::time::Duration;

use serde::Deserialize;

/// Eviction policy for a single cache region.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// Maximum number of entries in the region.
    pub max_capacity: u64,

    /// Time-to-live for entries.
    /// After this duration, entries are automatically evicted.
    #[serde(rename = "ttl_secs", with = "secs")]
    pub ttl: Option<Duration>,

    /// Time-to-idle for entries.
    /// Entries are evicted if not accessed within this duration.
    #[serde(rename = "tti_secs", with = "secs")]
    pub tti: Option<Duration>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

impl CachePolicy {
    /// Create a policy with the given max capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set max capacity (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Set time-to-idle for entries.
    #[must_use]
    pub fn tti(mut self, duration: Duration) -> Self {
        self.tti = Some(duration);
        self
    }

    /// Disable TTL (entries never expire based on time).
    #[must_use]
    pub fn no_ttl(mut self) -> Self {
        self.ttl = None;
        self
    }

    /// Published content per content type.
    /// Rarely changes between saves, so a long TTL is fine.
    pub fn content() -> Self {
        Self {
            max_capacity: 20_000,
            ttl: Some(Duration::from_secs(3600)), // 1 hour
            tti: None,
        }
    }

    /// Per-culture regions (dictionary items, localized fragments).
    pub fn culture() -> Self {
        Self {
            max_capacity: 5_000,
            ttl: Some(Duration::from_secs(1800)), // 30 minutes
            tti: Some(Duration::from_secs(600)),  // 10 minutes idle
        }
    }

    /// Permission and section lookups per user.
    pub fn permissions() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: Some(Duration::from_secs(120)), // 2 minutes idle
        }
    }

    /// Entity references extracted from property values.
    pub fn references() -> Self {
        Self {
            max_capacity: 2_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

/// Serde adapter: optional durations expressed as whole seconds.
mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
