//! Back-office sections and per-user access.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use policache::cache::CachePolicy;
//! use policache::sections::{InMemoryUserService, Section, SectionCollection, SectionService, User};
//!
//! let users = Arc::new(InMemoryUserService::new());
//! users.save(User::new(1, "editor", &["content"]));
//!
//! let service = SectionService::new(
//!     SectionCollection::new(vec![Section::new("content", "Content"), Section::new("media", "Media")]),
//!     users,
//!     &CachePolicy::permissions(),
//! );
//!
//! assert_eq!(service.allowed_sections(1).unwrap().len(), 1);
//! ```

mod service;
mod users;

pub use service::SectionService;
pub use users::{InMemoryUserService, User, UserService};

/// A back-office section such as Content or Media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub alias: String,
    pub name: String,
}

impl Section {
    pub fn new(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
        }
    }
}

/// Ordered set of registered sections.
#[derive(Debug, Clone, Default)]
pub struct SectionCollection {
    sections: Vec<Section>,
}

impl SectionCollection {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn by_alias(&self, alias: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.alias.eq_ignore_ascii_case(alias))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
