//! Identity allocation for created entities.

use crate::model::ids::EntityId;
use uuid::Uuid;

/// Issues one fresh id per created board, column or task.
pub trait IdAllocator {
    fn next_id(&mut self) -> EntityId;
}

/// Random v4 UUID allocator used by default stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn next_id(&mut self) -> EntityId {
        EntityId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic `<prefix>-<n>` allocator, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIdAllocator {
    prefix: String,
    next: u64,
}

impl SequentialIdAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIdAllocator {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn next_id(&mut self) -> EntityId {
        let id = EntityId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
