//! Sort keys for task projections.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Priority,
    DueDate,
    CreatedAt,
    AssignedTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Field plus direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Applies the direction to an ascending comparison.
    pub(crate) fn orient(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::descending(SortField::CreatedAt)
    }
}

/// Precomputed comparison key for one task.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SortKey {
    Text(String),
    Number(i64),
}

impl SortKey {
    /// Text keys are lowercased; a missing due date sorts as `0`.
    pub(crate) fn for_task(field: SortField, task: &Task, assignee_name: Option<&str>) -> Self {
        match field {
            SortField::Title => Self::Text(task.title.to_lowercase()),
            SortField::AssignedTo => Self::Text(assignee_name.unwrap_or_default().to_lowercase()),
            SortField::Priority => Self::Number(i64::from(task.priority.rank())),
            SortField::DueDate => Self::Number(task.due_date.unwrap_or(0)),
            SortField::CreatedAt => Self::Number(task.created_at),
        }
    }
}
