//! User lookup used by the section service.

use std::collections::HashMap;

use parking_lot::RwLock;

/// A back-office user and the section aliases they may open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub allowed_sections: Vec<String>,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, allowed_sections: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            allowed_sections: allowed_sections.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check if the user may open the section with `alias`.
    pub fn can_access(&self, alias: &str) -> bool {
        self.allowed_sections
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(alias))
    }
}

/// Source of user records.
pub trait UserService: Send + Sync {
    fn user_by_id(&self, id: i64) -> Option<User>;
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserService {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user.
    pub fn save(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    pub fn delete(&self, id: i64) -> bool {
        self.users.write().remove(&id).is_some()
    }
}

impl UserService for InMemoryUserService {
    fn user_by_id(&self, id: i64) -> Option<User> {
        self.users.read().get(&id).cloned()
    }
}
