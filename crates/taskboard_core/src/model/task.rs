//! Task record and its request/patch shapes.
//!
//! # Invariants
//! - `order` equals the task's index in its column's `task_ids`.
//! - `column_id` is changed only by an explicit move.
//! - `assignee_id` and `created_by` are weak user references.

use crate::model::ids::{ColumnId, TaskId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed ordered priority scale: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Ordinal used by priority sorting (`low=1`, `medium=2`, `high=3`).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work item owned by one column for ordering purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub title: String,
    /// Markdown body; rendering happens outside core.
    pub description: String,
    pub priority: Priority,
    /// Epoch ms due instant.
    pub due_date: Option<i64>,
    pub assignee_id: Option<UserId>,
    pub created_by: UserId,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms last field update.
    pub updated_at: i64,
    /// Dense position among sibling tasks.
    pub order: usize,
}

/// Request model for [`crate::HierarchyStore::create_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub column_id: ColumnId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<i64>,
    pub assignee_id: Option<UserId>,
    /// Acting user supplied by the authentication context.
    pub created_by: UserId,
}

impl NewTask {
    /// Creates a request with empty description, medium priority, no due
    /// date and no assignee.
    pub fn new(
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
        created_by: impl Into<UserId>,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            assignee_id: None,
            created_by: created_by.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_epoch_ms: i64) -> Self {
        self.due_date = Some(due_epoch_ms);
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<UserId>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}

/// Partial task update.
///
/// Outer `None` leaves a field unchanged. For optional fields the inner
/// `None` clears the value. Column and order are not patchable; use
/// `move_task`/`reorder_tasks` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<i64>>,
    pub assignee_id: Option<Option<UserId>>,
}

impl TaskPatch {
    /// Returns whether the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assignee_id.is_none()
    }
}
