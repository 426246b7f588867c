//! Core ordering and view engine for task boards.
//!
//! The [`HierarchyStore`] owns the board → column → task tree and keeps every
//! sibling `order` dense across mutations. The [`view`] module derives
//! filtered, sorted projections without touching canonical order.

pub mod config;
pub mod logging;
pub mod model;
pub mod ports;
pub mod store;
pub mod view;

pub use config::{StoreConfig, DEFAULT_STARTER_COLUMNS};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardPatch, Column, ColumnPatch};
pub use model::ids::{BoardId, ColumnId, EntityId, TaskId, UserId};
pub use model::snapshot::{BoardView, ColumnView, Snapshot, SnapshotError};
pub use model::task::{NewTask, Priority, Task, TaskPatch};
pub use model::text::ValidationError;
pub use ports::{
    Clock, IdAllocator, ManualClock, SequentialIdAllocator, StaticUserDirectory, SystemClock,
    UserDirectory, UserProfile, UuidAllocator,
};
pub use store::sample::{sample_users, seed_sample_board};
pub use store::{ChangeEvent, ErrorKind, HierarchyStore, SnapshotObserver, StoreError, StoreResult};
pub use view::{
    project_tasks, DueDateRange, FilterSpec, SortDirection, SortField, SortSpec, ViewState,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
