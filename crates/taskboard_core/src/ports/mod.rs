//! Collaborator contracts consumed by the engine.
//!
//! # Responsibility
//! - Abstract identity allocation, wall-clock time and user lookup.
//! - Ship default and deterministic implementations for embedding/tests.

pub mod clock;
pub mod directory;
pub mod identity;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{StaticUserDirectory, UserDirectory, UserProfile};
pub use identity::{IdAllocator, SequentialIdAllocator, UuidAllocator};
