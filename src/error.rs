//! Error types.

use thiserror::Error;

/// Failures surfaced by a cache registry.
///
/// A missing key is never an error; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The caller-supplied factory could not build a region.
    #[error("cache factory failed for key {key}")]
    Factory {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// The registry was used after `dispose`.
    #[error("cache registry '{registry}' has been disposed")]
    Disposed { registry: String },
}

/// Failures surfaced by the section service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("no user found with id {0}")]
    UserNotFound(i64),
}
