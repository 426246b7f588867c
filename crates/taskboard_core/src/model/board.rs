//! Board and column records.
//!
//! # Responsibility
//! - Define container entities of the board hierarchy.
//! - Hold child sequences as id lists (arena + index layout).
//!
//! # Invariants
//! - `Board::column_ids[i]` refers to a column whose `order == i`.
//! - `Column::task_ids[i]` refers to a task whose `order == i`.
//! - `Column::board_id` is a back-reference, never ownership.

use crate::model::ids::{BoardId, ColumnId, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Top-level container of ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: String,
    /// Acting user at creation time; trusted, not validated.
    pub owner_id: UserId,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Columns in display order.
    pub column_ids: Vec<ColumnId>,
}

/// Ordered container of tasks inside one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    /// Dense position among sibling columns.
    pub order: usize,
    /// Tasks in display order.
    pub task_ids: Vec<TaskId>,
}

/// Partial board update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Partial column update. Order and parentage are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPatch {
    pub title: Option<String>,
}

impl ColumnPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}
