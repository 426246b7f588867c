//! Hierarchy store and its change/observer contracts.
//!
//! # Responsibility
//! - Own the canonical board tree and all mutating operations.
//! - Expose per-mutation change events for persistence and replication.
//!
//! # See also
//! - [`crate::view`] for read-only projections over store snapshots.

pub mod change;
pub mod error;
pub mod hierarchy;
pub mod sample;

pub use change::{ChangeEvent, SnapshotObserver};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use hierarchy::HierarchyStore;
