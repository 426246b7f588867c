//! Immutable board tree snapshot.
//!
//! # Responsibility
//! - Hold the whole Board → Column → Task tree as id-keyed lookup tables.
//! - Offer read APIs for display code and persistence adapters.
//! - Verify ordering and back-reference invariants of reloaded snapshots.
//!
//! # Invariants
//! - Column `order` values of every board are dense `0..n-1` by position.
//! - Task `order` values of every column are dense `0..m-1` by position.
//! - Every column is listed by exactly one board; every task by exactly one
//!   column, and each child's parent id names that container.
//!
//! Entities are stored behind `Arc`, so cloning a snapshot shares every
//! record; writers copy only the records they touch (`Arc::make_mut`).

use crate::model::board::{Board, Column};
use crate::model::ids::{BoardId, ColumnId, EntityId, TaskId};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Inconsistency found while checking a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Lookup key differs from the stored entity id.
    KeyMismatch {
        kind: &'static str,
        key: EntityId,
        id: EntityId,
    },
    /// A sequence references an entity that is not in the snapshot.
    MissingEntity { kind: &'static str, id: EntityId },
    /// An entity is referenced by more than one sequence slot.
    DuplicateReference { kind: &'static str, id: EntityId },
    /// An entity is not referenced by any parent sequence.
    Unreferenced { kind: &'static str, id: EntityId },
    /// Child back-reference names another parent.
    ParentMismatch {
        kind: &'static str,
        id: EntityId,
        expected: EntityId,
        actual: EntityId,
    },
    /// Stored order differs from sequence position.
    OrderMismatch {
        kind: &'static str,
        id: EntityId,
        expected: usize,
        actual: usize,
    },
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyMismatch { kind, key, id } => {
                write!(f, "{kind} stored under key {key} has id {id}")
            }
            Self::MissingEntity { kind, id } => write!(f, "referenced {kind} missing: {id}"),
            Self::DuplicateReference { kind, id } => {
                write!(f, "{kind} referenced more than once: {id}")
            }
            Self::Unreferenced { kind, id } => write!(f, "{kind} not attached to a parent: {id}"),
            Self::ParentMismatch {
                kind,
                id,
                expected,
                actual,
            } => write!(
                f,
                "{kind} {id} is listed under {expected} but points to {actual}"
            ),
            Self::OrderMismatch {
                kind,
                id,
                expected,
                actual,
            } => write!(f, "{kind} {id} has order {actual}, expected {expected}"),
        }
    }
}

impl Error for SnapshotError {}

/// Whole-tree value published by the hierarchy store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Boards in creation order.
    board_order: Vec<BoardId>,
    boards: BTreeMap<BoardId, Arc<Board>>,
    columns: BTreeMap<ColumnId, Arc<Column>>,
    tasks: BTreeMap<TaskId, Arc<Task>>,
}

/// Nested read model of one board for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView<'a> {
    pub board: &'a Board,
    pub columns: Vec<ColumnView<'a>>,
}

/// One column of a [`BoardView`] with its tasks in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView<'a> {
    pub column: &'a Column,
    pub tasks: Vec<&'a Task>,
}

impl Snapshot {
    /// Boards in creation order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> + '_ {
        self.board_order
            .iter()
            .filter_map(|id| self.boards.get(id))
            .map(Arc::as_ref)
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.get(id).map(Arc::as_ref)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id).map(Arc::as_ref)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id).map(Arc::as_ref)
    }

    /// Columns of one board in canonical order, or `None` for unknown boards.
    pub fn columns_of(&self, board_id: &str) -> Option<Vec<&Column>> {
        let board = self.board(board_id)?;
        Some(
            board
                .column_ids
                .iter()
                .filter_map(|id| self.column(id.as_str()))
                .collect(),
        )
    }

    /// Tasks of one column in canonical order, or `None` for unknown columns.
    pub fn tasks_in(&self, column_id: &str) -> Option<Vec<&Task>> {
        let column = self.column(column_id)?;
        Some(
            column
                .task_ids
                .iter()
                .filter_map(|id| self.task(id.as_str()))
                .collect(),
        )
    }

    /// Builds the nested board → columns → tasks view.
    pub fn board_view(&self, board_id: &str) -> Option<BoardView<'_>> {
        let board = self.board(board_id)?;
        let columns = board
            .column_ids
            .iter()
            .filter_map(|id| self.column(id.as_str()))
            .map(|column| ColumnView {
                column,
                tasks: column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.task(id.as_str()))
                    .collect(),
            })
            .collect();
        Some(BoardView { board, columns })
    }

    /// Total number of tasks across all boards.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of tasks across all columns of one board.
    pub fn board_task_count(&self, board_id: &str) -> Option<usize> {
        let columns = self.columns_of(board_id)?;
        Some(columns.iter().map(|column| column.task_ids.len()).sum())
    }

    /// Returns whether any board, column or task already uses `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.boards.contains_key(id) || self.columns.contains_key(id) || self.tasks.contains_key(id)
    }

    /// Verifies every structural invariant of the tree.
    ///
    /// Used on reload paths; store mutations keep these by construction.
    pub fn check_invariants(&self) -> Result<(), SnapshotError> {
        for (key, board) in &self.boards {
            ensure_key("board", key, &board.id)?;
        }
        for (key, column) in &self.columns {
            ensure_key("column", key, &column.id)?;
        }
        for (key, task) in &self.tasks {
            ensure_key("task", key, &task.id)?;
        }

        let mut seen_boards = BTreeSet::new();
        for board_id in &self.board_order {
            if !self.boards.contains_key(board_id) {
                return Err(SnapshotError::MissingEntity {
                    kind: "board",
                    id: board_id.clone(),
                });
            }
            if !seen_boards.insert(board_id) {
                return Err(SnapshotError::DuplicateReference {
                    kind: "board",
                    id: board_id.clone(),
                });
            }
        }
        if let Some(id) = self.boards.keys().find(|id| !seen_boards.contains(id)) {
            return Err(SnapshotError::Unreferenced {
                kind: "board",
                id: id.clone(),
            });
        }

        let mut seen_columns = BTreeSet::new();
        for board in self.boards.values() {
            for (index, column_id) in board.column_ids.iter().enumerate() {
                let column = self.columns.get(column_id).ok_or_else(|| {
                    SnapshotError::MissingEntity {
                        kind: "column",
                        id: column_id.clone(),
                    }
                })?;
                if !seen_columns.insert(column_id) {
                    return Err(SnapshotError::DuplicateReference {
                        kind: "column",
                        id: column_id.clone(),
                    });
                }
                ensure_parent("column", column_id, &board.id, &column.board_id)?;
                ensure_order("column", column_id, index, column.order)?;
            }
        }
        if let Some(id) = self.columns.keys().find(|id| !seen_columns.contains(id)) {
            return Err(SnapshotError::Unreferenced {
                kind: "column",
                id: id.clone(),
            });
        }

        let mut seen_tasks = BTreeSet::new();
        for column in self.columns.values() {
            for (index, task_id) in column.task_ids.iter().enumerate() {
                let task =
                    self.tasks
                        .get(task_id)
                        .ok_or_else(|| SnapshotError::MissingEntity {
                            kind: "task",
                            id: task_id.clone(),
                        })?;
                if !seen_tasks.insert(task_id) {
                    return Err(SnapshotError::DuplicateReference {
                        kind: "task",
                        id: task_id.clone(),
                    });
                }
                ensure_parent("task", task_id, &column.id, &task.column_id)?;
                ensure_order("task", task_id, index, task.order)?;
            }
        }
        if let Some(id) = self.tasks.keys().find(|id| !seen_tasks.contains(id)) {
            return Err(SnapshotError::Unreferenced {
                kind: "task",
                id: id.clone(),
            });
        }

        Ok(())
    }

    pub(crate) fn insert_board(&mut self, board: Board) {
        self.board_order.push(board.id.clone());
        self.boards.insert(board.id.clone(), Arc::new(board));
    }

    pub(crate) fn insert_column(&mut self, column: Column) {
        self.columns.insert(column.id.clone(), Arc::new(column));
    }

    pub(crate) fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), Arc::new(task));
    }

    pub(crate) fn board_mut(&mut self, id: &str) -> Option<&mut Board> {
        self.boards.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id).map(Arc::make_mut)
    }

    pub(crate) fn remove_board(&mut self, id: &str) -> Option<Arc<Board>> {
        let board = self.boards.remove(id)?;
        self.board_order.retain(|board_id| board_id.as_str() != id);
        Some(board)
    }

    pub(crate) fn remove_column(&mut self, id: &str) -> Option<Arc<Column>> {
        self.columns.remove(id)
    }

    pub(crate) fn remove_task(&mut self, id: &str) -> Option<Arc<Task>> {
        self.tasks.remove(id)
    }

    /// Rewrites column orders of one board to match sequence positions.
    ///
    /// Records whose order already matches stay shared with older snapshots.
    pub(crate) fn redensify_columns(&mut self, board_id: &str) {
        let Some(board) = self.boards.get(board_id) else {
            return;
        };
        let column_ids = board.column_ids.clone();
        for (index, column_id) in column_ids.iter().enumerate() {
            if let Some(column) = self.columns.get_mut(column_id) {
                if column.order != index {
                    Arc::make_mut(column).order = index;
                }
            }
        }
    }

    /// Rewrites task orders of one column to match sequence positions.
    pub(crate) fn redensify_tasks(&mut self, column_id: &str) {
        let Some(column) = self.columns.get(column_id) else {
            return;
        };
        let task_ids = column.task_ids.clone();
        for (index, task_id) in task_ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(task_id) {
                if task.order != index {
                    Arc::make_mut(task).order = index;
                }
            }
        }
    }

    /// Returns whether two snapshots share the same stored record for `task_id`.
    #[cfg(test)]
    pub(crate) fn shares_task_with(&self, other: &Snapshot, task_id: &str) -> bool {
        match (self.tasks.get(task_id), other.tasks.get(task_id)) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

fn ensure_key(kind: &'static str, key: &EntityId, id: &EntityId) -> Result<(), SnapshotError> {
    if key != id {
        return Err(SnapshotError::KeyMismatch {
            kind,
            key: key.clone(),
            id: id.clone(),
        });
    }
    Ok(())
}

fn ensure_parent(
    kind: &'static str,
    id: &EntityId,
    expected: &EntityId,
    actual: &EntityId,
) -> Result<(), SnapshotError> {
    if expected != actual {
        return Err(SnapshotError::ParentMismatch {
            kind,
            id: id.clone(),
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

fn ensure_order(
    kind: &'static str,
    id: &EntityId,
    expected: usize,
    actual: usize,
) -> Result<(), SnapshotError> {
    if expected != actual {
        return Err(SnapshotError::OrderMismatch {
            kind,
            id: id.clone(),
            expected,
            actual,
        });
    }
    Ok(())
}
