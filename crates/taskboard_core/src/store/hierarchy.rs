//! Hierarchy store: order-consistent mutations over the board tree.
//!
//! # Responsibility
//! - Create, update, delete, move and reorder boards/columns/tasks.
//! - Publish a new immutable snapshot per successful mutation.
//! - Notify observers with the published snapshot and its change event.
//!
//! # Invariants
//! - Every mutation works on a private copy; failures discard the copy and
//!   leave the current snapshot untouched.
//! - Published snapshots always satisfy `Snapshot::check_invariants`.
//! - Mutations take `&mut self`: one mutation owns the whole tree at a time.
//! - No-op requests (same-position move, `from == to` reorder, empty patch)
//!   publish nothing.

use crate::config::StoreConfig;
use crate::model::board::{Board, BoardPatch, Column, ColumnPatch};
use crate::model::ids::{BoardId, ColumnId, EntityId, UserId};
use crate::model::snapshot::{Snapshot, SnapshotError};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::text::normalize_title;
use crate::ports::{Clock, IdAllocator, SystemClock, UuidAllocator};
use crate::store::change::{ChangeEvent, SnapshotObserver};
use crate::store::error::{StoreError, StoreResult};
use log::{debug, info};
use std::sync::Arc;

/// Owner of the canonical board tree.
pub struct HierarchyStore<A = UuidAllocator, C = SystemClock> {
    config: StoreConfig,
    current: Arc<Snapshot>,
    ids: A,
    clock: C,
    observers: Vec<Box<dyn SnapshotObserver + Send>>,
}

impl HierarchyStore {
    /// Creates an empty store with default config, UUID ids and system time.
    pub fn new() -> Self {
        Self::with_parts(StoreConfig::default(), UuidAllocator, SystemClock)
    }
}

impl Default for HierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: IdAllocator, C: Clock> HierarchyStore<A, C> {
    /// Creates an empty store from explicit collaborators.
    pub fn with_parts(config: StoreConfig, ids: A, clock: C) -> Self {
        Self {
            config,
            current: Arc::new(Snapshot::default()),
            ids,
            clock,
            observers: Vec::new(),
        }
    }

    /// Restores a store from a persisted snapshot.
    ///
    /// # Errors
    /// - Returns the first invariant violation found in `snapshot`.
    pub fn from_snapshot(
        snapshot: Snapshot,
        config: StoreConfig,
        ids: A,
        clock: C,
    ) -> Result<Self, SnapshotError> {
        snapshot.check_invariants()?;
        info!(
            "event=store_restore module=store status=ok boards={} tasks={}",
            snapshot.boards().count(),
            snapshot.task_count()
        );
        Ok(Self {
            config,
            current: Arc::new(snapshot),
            ids,
            clock,
            observers: Vec::new(),
        })
    }

    /// Registers an observer for published snapshots.
    pub fn add_observer(&mut self, observer: impl SnapshotObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns a handle to the current snapshot.
    ///
    /// The handle stays valid and unchanged after later mutations.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Borrows the current snapshot for reads.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Creates a board with the configured starter columns.
    pub fn create_board(
        &mut self,
        title: &str,
        description: &str,
        owner_id: impl Into<UserId>,
    ) -> StoreResult<Board> {
        let owner_id = owner_id.into();
        traced("board_create", || {
            let title = normalize_title("board", title)?;
            let mut next = self.working_copy();
            let board_id = self.allocate(&next)?;
            next.insert_board(Board {
                id: board_id.clone(),
                title,
                description: description.to_string(),
                owner_id,
                created_at: self.clock.now_ms(),
                column_ids: Vec::new(),
            });

            let starters = self.config.starter_columns().to_vec();
            for (order, starter) in starters.into_iter().enumerate() {
                let column_id = self.allocate(&next)?;
                next.insert_column(Column {
                    id: column_id.clone(),
                    board_id: board_id.clone(),
                    title: starter,
                    order,
                    task_ids: Vec::new(),
                });
                board_in(&mut next, board_id.as_str())?.column_ids.push(column_id);
            }

            let board = board_in(&mut next, board_id.as_str())?.clone();
            self.publish(next, ChangeEvent::BoardCreated { board_id });
            Ok(board)
        })
    }

    /// Updates board title and/or description.
    pub fn update_board(&mut self, board_id: &str, patch: BoardPatch) -> StoreResult<Board> {
        traced("board_update", || {
            let current = self
                .current
                .board(board_id)
                .ok_or_else(|| StoreError::BoardNotFound(board_id.into()))?;
            if patch.title.is_none() && patch.description.is_none() {
                return Ok(current.clone());
            }
            let title = patch
                .title
                .as_deref()
                .map(|value| normalize_title("board", value))
                .transpose()?;

            let mut next = self.working_copy();
            let board = board_in(&mut next, board_id)?;
            if let Some(title) = title {
                board.title = title;
            }
            if let Some(description) = patch.description {
                board.description = description;
            }
            let updated = board.clone();
            self.publish(
                next,
                ChangeEvent::BoardUpdated {
                    board_id: updated.id.clone(),
                },
            );
            Ok(updated)
        })
    }

    /// Deletes a board with all of its columns and tasks.
    pub fn delete_board(&mut self, board_id: &str) -> StoreResult<()> {
        traced("board_delete", || {
            let mut next = self.working_copy();
            let board = next
                .remove_board(board_id)
                .ok_or_else(|| StoreError::BoardNotFound(board_id.into()))?;

            let mut removed_tasks = 0;
            for column_id in &board.column_ids {
                if let Some(column) = next.remove_column(column_id.as_str()) {
                    for task_id in &column.task_ids {
                        next.remove_task(task_id.as_str());
                    }
                    removed_tasks += column.task_ids.len();
                }
            }

            self.publish(
                next,
                ChangeEvent::BoardDeleted {
                    board_id: board.id.clone(),
                    removed_columns: board.column_ids.len(),
                    removed_tasks,
                },
            );
            Ok(())
        })
    }

    /// Appends a column to a board.
    pub fn create_column(&mut self, board_id: &str, title: &str) -> StoreResult<Column> {
        traced("column_create", || {
            let title = normalize_title("column", title)?;
            let mut next = self.working_copy();
            let order = board_in(&mut next, board_id)?.column_ids.len();
            let column_id = self.allocate(&next)?;
            let column = Column {
                id: column_id.clone(),
                board_id: board_id.into(),
                title,
                order,
                task_ids: Vec::new(),
            };
            next.insert_column(column.clone());
            board_in(&mut next, board_id)?.column_ids.push(column_id.clone());

            self.publish(
                next,
                ChangeEvent::ColumnCreated {
                    board_id: column.board_id.clone(),
                    column_id,
                    order,
                },
            );
            Ok(column)
        })
    }

    /// Applies a column patch. Order and board are untouched.
    pub fn update_column(&mut self, column_id: &str, patch: ColumnPatch) -> StoreResult<Column> {
        traced("column_update", || {
            let current = self
                .current
                .column(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.into()))?;
            let Some(title) = patch.title.as_deref() else {
                return Ok(current.clone());
            };
            let title = normalize_title("column", title)?;

            let mut next = self.working_copy();
            let column = column_in(&mut next, column_id)?;
            column.title = title;
            let updated = column.clone();
            self.publish(
                next,
                ChangeEvent::ColumnUpdated {
                    board_id: updated.board_id.clone(),
                    column_id: updated.id.clone(),
                },
            );
            Ok(updated)
        })
    }

    /// Deletes a column with its tasks and re-densifies sibling columns.
    pub fn delete_column(&mut self, column_id: &str) -> StoreResult<()> {
        traced("column_delete", || {
            let mut next = self.working_copy();
            let column = next
                .remove_column(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.into()))?;
            for task_id in &column.task_ids {
                next.remove_task(task_id.as_str());
            }
            board_in(&mut next, column.board_id.as_str())?
                .column_ids
                .retain(|id| id.as_str() != column_id);
            next.redensify_columns(column.board_id.as_str());

            self.publish(
                next,
                ChangeEvent::ColumnDeleted {
                    board_id: column.board_id.clone(),
                    column_id: column.id.clone(),
                    former_order: column.order,
                    removed_tasks: column.task_ids.len(),
                },
            );
            Ok(())
        })
    }

    /// Moves the column at `from_index` to `to_index` within its board.
    pub fn reorder_columns(
        &mut self,
        board_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> StoreResult<()> {
        traced("columns_reorder", || {
            let board = self
                .current
                .board(board_id)
                .ok_or_else(|| StoreError::BoardNotFound(board_id.into()))?;
            ensure_reorder_bounds(from_index, to_index, board.column_ids.len())?;
            if from_index == to_index {
                return Ok(());
            }

            let mut next = self.working_copy();
            let moved = move_within(
                &mut board_in(&mut next, board_id)?.column_ids,
                from_index,
                to_index,
            );
            next.redensify_columns(board_id);

            self.publish(
                next,
                ChangeEvent::ColumnsReordered {
                    board_id: board_id.into(),
                    column_id: moved,
                    from: from_index,
                    to: to_index,
                },
            );
            Ok(())
        })
    }

    /// Appends a new task to a column.
    pub fn create_task(&mut self, request: NewTask) -> StoreResult<Task> {
        traced("task_create", || {
            let title = normalize_title("task", &request.title)?;
            let mut next = self.working_copy();
            let column = column_in(&mut next, request.column_id.as_str())?;
            let order = column.task_ids.len();
            let board_id = column.board_id.clone();
            let task_id = self.allocate(&next)?;
            let now = self.clock.now_ms();
            let task = Task {
                id: task_id.clone(),
                column_id: request.column_id.clone(),
                title,
                description: request.description,
                priority: request.priority,
                due_date: request.due_date,
                assignee_id: request.assignee_id,
                created_by: request.created_by,
                created_at: now,
                updated_at: now,
                order,
            };
            next.insert_task(task.clone());
            column_in(&mut next, request.column_id.as_str())?
                .task_ids
                .push(task_id.clone());

            self.publish(
                next,
                ChangeEvent::TaskCreated {
                    board_id,
                    column_id: request.column_id,
                    task_id,
                    order,
                },
            );
            Ok(task)
        })
    }

    /// Applies a task patch and bumps `updated_at`. Order and column are
    /// untouched.
    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> StoreResult<Task> {
        traced("task_update", || {
            let current = self
                .current
                .task(task_id)
                .ok_or_else(|| StoreError::TaskNotFound(task_id.into()))?;
            if patch.is_empty() {
                return Ok(current.clone());
            }
            let board_id = self.board_of_column(&current.column_id)?;
            let title = patch
                .title
                .as_deref()
                .map(|value| normalize_title("task", value))
                .transpose()?;
            let now = self.clock.now_ms();

            let mut next = self.working_copy();
            let task = task_in(&mut next, task_id)?;
            if let Some(title) = title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            if let Some(assignee_id) = patch.assignee_id {
                task.assignee_id = assignee_id;
            }
            task.updated_at = now;
            let updated = task.clone();

            self.publish(
                next,
                ChangeEvent::TaskUpdated {
                    board_id,
                    column_id: updated.column_id.clone(),
                    task_id: updated.id.clone(),
                },
            );
            Ok(updated)
        })
    }

    /// Removes a task and re-densifies its former siblings.
    pub fn delete_task(&mut self, task_id: &str) -> StoreResult<()> {
        traced("task_delete", || {
            let mut next = self.working_copy();
            let task = next
                .remove_task(task_id)
                .ok_or_else(|| StoreError::TaskNotFound(task_id.into()))?;
            let column = column_in(&mut next, task.column_id.as_str())?;
            column.task_ids.retain(|id| id.as_str() != task_id);
            let board_id = column.board_id.clone();
            next.redensify_tasks(task.column_id.as_str());

            self.publish(
                next,
                ChangeEvent::TaskDeleted {
                    board_id,
                    column_id: task.column_id.clone(),
                    task_id: task.id.clone(),
                    former_order: task.order,
                },
            );
            Ok(())
        })
    }

    /// Moves a task into `target_column_id` at `target_index`.
    ///
    /// The task is removed from its source column first, then inserted at
    /// `target_index` clamped to `[0, len]`, or appended when no index is
    /// given. Moving within the same column without an index therefore puts
    /// the task last. A move that lands on the task's current position is a
    /// no-op. The target column may belong to another board.
    ///
    /// # Errors
    /// - `TaskNotFound` when the task does not exist.
    /// - `ColumnNotFound` when the target column does not exist.
    pub fn move_task(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        target_index: Option<usize>,
    ) -> StoreResult<Task> {
        traced("task_move", || {
            let task = self
                .current
                .task(task_id)
                .ok_or_else(|| StoreError::TaskNotFound(task_id.into()))?;
            let source_column_id = task.column_id.clone();
            let from_order = task.order;
            let board_id = self.board_of_column(&source_column_id)?;
            let target = self
                .current
                .column(target_column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(target_column_id.into()))?;
            let to_board_id = target.board_id.clone();

            let same_column = source_column_id.as_str() == target_column_id;
            let len_after_removal = if same_column {
                target.task_ids.len() - 1
            } else {
                target.task_ids.len()
            };
            let to_order = target_index
                .map_or(len_after_removal, |index| index.min(len_after_removal));
            if same_column && to_order == from_order {
                return Ok(task.clone());
            }

            let mut next = self.working_copy();
            column_in(&mut next, source_column_id.as_str())?
                .task_ids
                .retain(|id| id.as_str() != task_id);
            next.redensify_tasks(source_column_id.as_str());

            column_in(&mut next, target_column_id)?
                .task_ids
                .insert(to_order, task_id.into());
            task_in(&mut next, task_id)?.column_id = target_column_id.into();
            next.redensify_tasks(target_column_id);
            let moved = task_in(&mut next, task_id)?.clone();

            self.publish(
                next,
                ChangeEvent::TaskMoved {
                    board_id,
                    to_board_id,
                    task_id: moved.id.clone(),
                    from_column_id: source_column_id,
                    from_order,
                    to_column_id: moved.column_id.clone(),
                    to_order: moved.order,
                },
            );
            Ok(moved)
        })
    }

    /// Moves the task at `from_index` to `to_index` within one column.
    pub fn reorder_tasks(
        &mut self,
        column_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> StoreResult<()> {
        traced("tasks_reorder", || {
            let column = self
                .current
                .column(column_id)
                .ok_or_else(|| StoreError::ColumnNotFound(column_id.into()))?;
            ensure_reorder_bounds(from_index, to_index, column.task_ids.len())?;
            if from_index == to_index {
                return Ok(());
            }
            let board_id = column.board_id.clone();

            let mut next = self.working_copy();
            let moved = move_within(
                &mut column_in(&mut next, column_id)?.task_ids,
                from_index,
                to_index,
            );
            next.redensify_tasks(column_id);

            self.publish(
                next,
                ChangeEvent::TasksReordered {
                    board_id,
                    column_id: column_id.into(),
                    task_id: moved,
                    from: from_index,
                    to: to_index,
                },
            );
            Ok(())
        })
    }

    fn working_copy(&self) -> Snapshot {
        Snapshot::clone(&self.current)
    }

    fn allocate(&mut self, next: &Snapshot) -> StoreResult<EntityId> {
        let id = self.ids.next_id();
        if next.contains_id(id.as_str()) {
            return Err(StoreError::DuplicateId(id));
        }
        Ok(id)
    }

    fn board_of_column(&self, column_id: &ColumnId) -> StoreResult<BoardId> {
        self.current
            .column(column_id.as_str())
            .map(|column| column.board_id.clone())
            .ok_or_else(|| StoreError::ColumnNotFound(column_id.clone()))
    }

    fn publish(&mut self, next: Snapshot, change: ChangeEvent) {
        debug_assert_eq!(next.check_invariants(), Ok(()));
        self.current = Arc::new(next);
        debug!(
            "event={} module=store status=ok board={} entity={}",
            change.kind(),
            change.board_id(),
            change.entity_id()
        );
        for observer in &mut self.observers {
            observer.on_commit(&self.current, &change);
        }
    }
}

/// Runs one store operation and logs rejected requests.
fn traced<T>(event: &'static str, run: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
    let result = run();
    if let Err(err) = &result {
        debug!(
            "event={} module=store status=error error_kind={}",
            event,
            err.label()
        );
    }
    result
}

fn board_in<'a>(snapshot: &'a mut Snapshot, board_id: &str) -> StoreResult<&'a mut Board> {
    snapshot
        .board_mut(board_id)
        .ok_or_else(|| StoreError::BoardNotFound(board_id.into()))
}

fn column_in<'a>(snapshot: &'a mut Snapshot, column_id: &str) -> StoreResult<&'a mut Column> {
    snapshot
        .column_mut(column_id)
        .ok_or_else(|| StoreError::ColumnNotFound(column_id.into()))
}

fn task_in<'a>(snapshot: &'a mut Snapshot, task_id: &str) -> StoreResult<&'a mut Task> {
    snapshot
        .task_mut(task_id)
        .ok_or_else(|| StoreError::TaskNotFound(task_id.into()))
}

fn ensure_reorder_bounds(from_index: usize, to_index: usize, len: usize) -> StoreResult<()> {
    for index in [from_index, to_index] {
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
    }
    Ok(())
}

/// Removes the id at `from` and reinserts it at `to`; returns the moved id.
///
/// Callers check both bounds first.
fn move_within(ids: &mut Vec<EntityId>, from: usize, to: usize) -> EntityId {
    let moved = ids.remove(from);
    ids.insert(to, moved.clone());
    moved
}
