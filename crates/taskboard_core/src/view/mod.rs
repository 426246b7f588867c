//! View projection over canonical task sequences.
//!
//! # Responsibility
//! - Derive a filtered, sorted display sequence for one column.
//! - Keep view state (active filter and sort) separate from the store.
//!
//! # Invariants
//! - Projection never writes to tasks or to canonical order.
//! - Sorting is stable; equal keys keep input order in both directions.
//! - Assignee names are resolved at most once per task per projection.

pub mod filter;
pub mod sort;

pub use filter::{DueDateRange, FilterSpec};
pub use sort::{SortDirection, SortField, SortSpec};

use crate::model::task::Task;
use crate::ports::UserDirectory;
use sort::SortKey;

/// Filters then sorts `tasks` without touching their canonical order.
pub fn project_tasks<'a, I, D>(
    tasks: I,
    filter: &FilterSpec,
    sort: &SortSpec,
    directory: &D,
) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
    D: UserDirectory + ?Sized,
{
    let query_lower = filter.query.to_lowercase();
    let needs_names = !query_lower.is_empty() || sort.field == SortField::AssignedTo;

    let mut keyed: Vec<(SortKey, &'a Task)> = tasks
        .into_iter()
        .filter_map(|task| {
            let assignee_name = if needs_names {
                task.assignee_id
                    .as_deref()
                    .and_then(|id| directory.resolve(id))
                    .map(|profile| profile.display_name)
            } else {
                None
            };
            filter
                .matches(task, &query_lower, assignee_name.as_deref())
                .then(|| (SortKey::for_task(sort.field, task, assignee_name.as_deref()), task))
        })
        .collect();

    keyed.sort_by(|(left, _), (right, _)| sort.orient(left.cmp(right)));
    keyed.into_iter().map(|(_, task)| task).collect()
}

/// Active filter and sort for one board screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: FilterSpec,
    sort: SortSpec,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Resets to no constraints and the default sort.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn project<'a, I, D>(&self, tasks: I, directory: &D) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
        D: UserDirectory + ?Sized,
    {
        project_tasks(tasks, &self.filter, &self.sort, directory)
    }
}
