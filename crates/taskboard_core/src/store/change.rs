//! Change descriptions published after successful mutations.
//!
//! # Responsibility
//! - Describe each committed mutation with affected ids and positions.
//! - Hand snapshots and changes to persistence/replication observers.
//!
//! # Invariants
//! - Observers only ever see published snapshots, never working copies.
//! - One change event is emitted per committed mutation; no-ops emit none.

use crate::model::ids::{BoardId, ColumnId, EntityId, TaskId};
use crate::model::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Committed mutation, tagged with a snake_case `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    BoardCreated {
        board_id: BoardId,
    },
    BoardUpdated {
        board_id: BoardId,
    },
    BoardDeleted {
        board_id: BoardId,
        removed_columns: usize,
        removed_tasks: usize,
    },
    ColumnCreated {
        board_id: BoardId,
        column_id: ColumnId,
        order: usize,
    },
    ColumnUpdated {
        board_id: BoardId,
        column_id: ColumnId,
    },
    ColumnDeleted {
        board_id: BoardId,
        column_id: ColumnId,
        former_order: usize,
        removed_tasks: usize,
    },
    ColumnsReordered {
        board_id: BoardId,
        column_id: ColumnId,
        from: usize,
        to: usize,
    },
    TaskCreated {
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
        order: usize,
    },
    TaskUpdated {
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
    },
    TaskDeleted {
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
        former_order: usize,
    },
    /// `board_id` is the source board; `to_board_id` differs only for moves
    /// across boards.
    TaskMoved {
        board_id: BoardId,
        to_board_id: BoardId,
        task_id: TaskId,
        from_column_id: ColumnId,
        from_order: usize,
        to_column_id: ColumnId,
        to_order: usize,
    },
    TasksReordered {
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
        from: usize,
        to: usize,
    },
}

impl ChangeEvent {
    /// Event name used in logs; matches the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BoardCreated { .. } => "board_created",
            Self::BoardUpdated { .. } => "board_updated",
            Self::BoardDeleted { .. } => "board_deleted",
            Self::ColumnCreated { .. } => "column_created",
            Self::ColumnUpdated { .. } => "column_updated",
            Self::ColumnDeleted { .. } => "column_deleted",
            Self::ColumnsReordered { .. } => "columns_reordered",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskUpdated { .. } => "task_updated",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::TaskMoved { .. } => "task_moved",
            Self::TasksReordered { .. } => "tasks_reordered",
        }
    }

    /// Board the change happened on.
    pub fn board_id(&self) -> &BoardId {
        match self {
            Self::BoardCreated { board_id }
            | Self::BoardUpdated { board_id }
            | Self::BoardDeleted { board_id, .. }
            | Self::ColumnCreated { board_id, .. }
            | Self::ColumnUpdated { board_id, .. }
            | Self::ColumnDeleted { board_id, .. }
            | Self::ColumnsReordered { board_id, .. }
            | Self::TaskCreated { board_id, .. }
            | Self::TaskUpdated { board_id, .. }
            | Self::TaskDeleted { board_id, .. }
            | Self::TaskMoved { board_id, .. }
            | Self::TasksReordered { board_id, .. } => board_id,
        }
    }

    /// Primary entity affected by the change.
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::BoardCreated { board_id }
            | Self::BoardUpdated { board_id }
            | Self::BoardDeleted { board_id, .. } => board_id,
            Self::ColumnCreated { column_id, .. }
            | Self::ColumnUpdated { column_id, .. }
            | Self::ColumnDeleted { column_id, .. }
            | Self::ColumnsReordered { column_id, .. } => column_id,
            Self::TaskCreated { task_id, .. }
            | Self::TaskUpdated { task_id, .. }
            | Self::TaskDeleted { task_id, .. }
            | Self::TaskMoved { task_id, .. }
            | Self::TasksReordered { task_id, .. } => task_id,
        }
    }
}

/// Receives every published snapshot with the change that produced it.
///
/// Persistence adapters store `snapshot`; presence/replication channels
/// forward `change`. Called synchronously after publication.
pub trait SnapshotObserver {
    fn on_commit(&mut self, snapshot: &Arc<Snapshot>, change: &ChangeEvent);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Arc<Snapshot>, &ChangeEvent),
{
    fn on_commit(&mut self, snapshot: &Arc<Snapshot>, change: &ChangeEvent) {
        self(snapshot, change)
    }
}
