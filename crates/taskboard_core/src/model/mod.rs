//! Board hierarchy domain model.
//!
//! # Responsibility
//! - Define boards, columns and tasks plus their request/patch shapes.
//! - Define the immutable [`snapshot::Snapshot`] published after mutations.
//!
//! # Invariants
//! - Child sequences are id lists; parents are referenced by id only.
//! - Every `order` value equals the entity's index in its parent sequence.

pub mod board;
pub mod ids;
pub mod snapshot;
pub mod task;
pub mod text;
