//! Policache - policy-keyed cache registries for a content management system.
//!
//! ## Architecture
//!
//! - `cache` - Region capability traits, Moka-backed regions, and the
//!   concurrent registry that creates, invalidates and disposes them
//! - `content` - Culture and content-type registries plus invalidation events
//! - `sections` - Back-office sections with cached per-user access
//! - `editors` - Property editor reference extraction
//! - `config` - Environment configuration
//! - `error` - Error types

pub mod cache;
pub mod config;
pub mod content;
pub mod editors;
pub mod error;
pub mod sections;

pub use error::{RegistryError, SectionError};
