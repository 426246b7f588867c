//! Filter constraints for task projections.
//!
//! # Invariants
//! - Every constraint is optional; an unset constraint matches everything.
//! - A present due range, even one without bounds, excludes undated tasks.
//! - Active constraints combine with logical AND.

use crate::model::ids::UserId;
use crate::model::task::{Priority, Task};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive due-date window in epoch ms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateRange {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl DueDateRange {
    pub fn between(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn since(from: i64) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn until(to: i64) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Missing bounds are open ends; a task without a due date never matches.
    pub fn contains(&self, due_date: Option<i64>) -> bool {
        let Some(due) = due_date else {
            return false;
        };
        self.from.map_or(true, |from| due >= from) && self.to.map_or(true, |to| due <= to)
    }
}

/// Search text plus optional attribute constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring; empty means no constraint.
    pub query: String,
    pub priorities: BTreeSet<Priority>,
    pub assignees: BTreeSet<UserId>,
    pub due: Option<DueDateRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<UserId>) -> Self {
        self.assignees.insert(assignee_id.into());
        self
    }

    pub fn with_due(mut self, range: DueDateRange) -> Self {
        self.due = Some(range);
        self
    }

    /// Number of constraints that can exclude a task.
    pub fn active_constraint_count(&self) -> usize {
        [
            !self.query.is_empty(),
            !self.priorities.is_empty(),
            !self.assignees.is_empty(),
            self.due.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_constraint_count() == 0
    }

    /// Checks one task against every constraint.
    ///
    /// `query_lower` is the lowercased query and `assignee_name` the resolved
    /// display name; callers precompute both once per projection.
    pub(crate) fn matches(
        &self,
        task: &Task,
        query_lower: &str,
        assignee_name: Option<&str>,
    ) -> bool {
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if !self.assignees.is_empty() {
            match task.assignee_id.as_ref() {
                Some(assignee) if self.assignees.contains(assignee) => {}
                _ => return false,
            }
        }
        if let Some(range) = self.due {
            if !range.contains(task.due_date) {
                return false;
            }
        }
        if query_lower.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(query_lower)
            || task.description.to_lowercase().contains(query_lower)
            || assignee_name.is_some_and(|name| name.to_lowercase().contains(query_lower))
    }
}
