//! External user directory used for display-name resolution.
//!
//! # Invariants
//! - Lookups never fail hard; unknown ids resolve to `None`.

use crate::model::ids::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolved user display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: String,
}

/// Resolves opaque user ids to display data.
pub trait UserDirectory {
    fn resolve(&self, user_id: &str) -> Option<UserProfile>;
}

/// In-memory directory backed by a fixed map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticUserDirectory {
    users: BTreeMap<UserId, UserProfile>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one user.
    pub fn insert(&mut self, id: impl Into<UserId>, display_name: impl Into<String>) {
        let id = id.into();
        self.users.insert(
            id.clone(),
            UserProfile {
                id,
                display_name: display_name.into(),
            },
        );
    }

    pub fn with_user(mut self, id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        self.insert(id, display_name);
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for StaticUserDirectory {
    fn resolve(&self, user_id: &str) -> Option<UserProfile> {
        self.users.get(user_id).cloned()
    }
}
