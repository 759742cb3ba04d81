//! Configuration module.
//!
//! Loads cache policies from environment variables.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use crate::cache::CachePolicy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Policy for per-culture regions.
    pub culture_policy: CachePolicy,

    /// Policy for per-content-type regions.
    pub content_type_policy: CachePolicy,

    /// Cultures to create regions for at startup (comma-separated).
    pub warm_cultures: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            culture_policy: CachePolicy::culture(),
            content_type_policy: CachePolicy::content(),
            warm_cultures: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset ones keep the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Whole-policy overrides first, so the narrower variables win.
        if let Some(raw) = lookup("CACHE_POLICIES") {
            let overrides: HashMap<String, CachePolicy> =
                serde_json::from_str(&raw).context("CACHE_POLICIES is not valid JSON")?;
            for (region, policy) in overrides {
                match region.as_str() {
                    "culture" => config.culture_policy = policy,
                    "content_type" => config.content_type_policy = policy,
                    other => anyhow::bail!("CACHE_POLICIES has unknown region '{other}'"),
                }
            }
        }

        if let Some(capacity) = parse_var::<u64>(&lookup, "CULTURE_CACHE_CAPACITY")? {
            config.culture_policy.max_capacity = capacity;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "CULTURE_CACHE_TTL_SECS")? {
            config.culture_policy.ttl = Some(Duration::from_secs(secs));
        }
        if let Some(capacity) = parse_var::<u64>(&lookup, "CONTENT_TYPE_CACHE_CAPACITY")? {
            config.content_type_policy.max_capacity = capacity;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "CONTENT_TYPE_CACHE_TTL_SECS")? {
            config.content_type_policy.ttl = Some(Duration::from_secs(secs));
        }

        // Parse warm cultures
        config.warm_cultures = lookup("WARM_CULTURES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(config)
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("{name} has an invalid value"))
}
