//! Section service with cached per-user lookups.

use std::sync::Arc;

use tracing::debug;

use super::{Section, SectionCollection, UserService};
use crate::cache::{CachePolicy, PolicyCache, RegionCache};
use crate::error::SectionError;

/// Resolves which back-office sections a user may open.
///
/// Allowed sections are cached per user id. Call [`invalidate_user`]
/// when a user's groups change.
///
/// [`invalidate_user`]: SectionService::invalidate_user
#[derive(Clone)]
pub struct SectionService {
    sections: Arc<SectionCollection>,
    users: Arc<dyn UserService>,
    cache: RegionCache<i64, Vec<Section>>,
}

impl SectionService {
    pub fn new(sections: SectionCollection, users: Arc<dyn UserService>, policy: &CachePolicy) -> Self {
        Self {
            sections: Arc::new(sections),
            users,
            cache: RegionCache::new("allowed_sections", policy),
        }
    }

    /// All registered sections, in registration order.
    pub fn sections(&self) -> &SectionCollection {
        &self.sections
    }

    /// Sections the user may open.
    pub fn allowed_sections(&self, user_id: i64) -> Result<Vec<Section>, SectionError> {
        if let Some(cached) = self.cache.get(&user_id) {
            debug!("Section cache hit for user {}", user_id);
            return Ok(cached);
        }

        debug!("Section cache miss for user {}", user_id);

        let user = self
            .users
            .user_by_id(user_id)
            .ok_or(SectionError::UserNotFound(user_id))?;

        let allowed: Vec<Section> = self
            .sections
            .iter()
            .filter(|section| user.can_access(&section.alias))
            .cloned()
            .collect();

        self.cache.insert(user_id, allowed.clone());
        Ok(allowed)
    }

    /// Find a section by alias, ignoring case.
    pub fn by_alias(&self, alias: &str) -> Option<&Section> {
        self.sections.by_alias(alias)
    }

    /// Drop the cached sections for one user.
    pub fn invalidate_user(&self, user_id: i64) {
        self.cache.invalidate(&user_id);
        debug!("Invalidated section cache for user {}", user_id);
    }

    /// Drop every cached lookup.
    pub fn invalidate_all(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{InMemoryUserService, User};

    fn setup() -> (SectionService, Arc<InMemoryUserService>) {
        let users = Arc::new(InMemoryUserService::new());
        users.save(User::new(1, "editor", &["content", "media"]));
        users.save(User::new(2, "admin", &["content", "media", "settings", "users"]));

        let sections = SectionCollection::new(vec![
            Section::new("content", "Content"),
            Section::new("media", "Media"),
            Section::new("settings", "Settings"),
            Section::new("users", "Users"),
        ]);

        let service = SectionService::new(
            sections,
            Arc::clone(&users) as Arc<dyn UserService>,
            &CachePolicy::permissions(),
        );
        (service, users)
    }

    fn aliases(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.alias.as_str()).collect()
    }

    #[test]
    fn test_allowed_sections_filters_by_user() {
        let (service, _) = setup();

        assert_eq!(aliases(&service.allowed_sections(1).unwrap()), vec!["content", "media"]);
        assert_eq!(service.allowed_sections(2).unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_user_is_an_error() {
        let (service, _) = setup();
        assert_eq!(
            service.allowed_sections(99),
            Err(SectionError::UserNotFound(99))
        );
    }

    #[test]
    fn test_cached_until_invalidated() {
        let (service, users) = setup();
        service.allowed_sections(1).unwrap();

        users.save(User::new(1, "editor", &["content", "media", "settings"]));
        assert_eq!(service.allowed_sections(1).unwrap().len(), 2);

        service.invalidate_user(1);
        assert_eq!(service.allowed_sections(1).unwrap().len(), 3);
    }

    #[test]
    fn test_invalidate_all_sees_deleted_users() {
        let (service, users) = setup();
        service.allowed_sections(1).unwrap();
        service.allowed_sections(2).unwrap();

        assert!(users.delete(2));
        assert!(!users.delete(2));
        assert_eq!(service.allowed_sections(2).unwrap().len(), 4);

        service.invalidate_all();
        assert_eq!(service.allowed_sections(2), Err(SectionError::UserNotFound(2)));
        assert_eq!(service.allowed_sections(1).unwrap().len(), 2);
    }

    #[test]
    fn test_by_alias_ignores_case() {
        let (service, _) = setup();

        assert_eq!(service.by_alias("MEDIA").map(|s| s.name.as_str()), Some("Media"));
        assert!(service.by_alias("forms").is_none());
        assert_eq!(service.sections().len(), 4);
    }
}
