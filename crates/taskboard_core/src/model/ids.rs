//! Entity identifiers.
//!
//! # Invariants
//! - Ids are opaque strings issued by an [`crate::ports::IdAllocator`].
//! - An id is never reused for another entity inside one store.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

/// Opaque, allocator-issued identity shared by boards, columns and tasks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an allocator-issued string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Board identifier.
pub type BoardId = EntityId;
/// Column identifier.
pub type ColumnId = EntityId;
/// Task identifier.
pub type TaskId = EntityId;

/// Opaque user reference owned by an external user directory.
///
/// The engine never validates user ids; it only stores and compares them.
pub type UserId = String;
