//! Hierarchy store error types.

use crate::model::ids::{BoardId, ColumnId, EntityId, TaskId};
use crate::model::text::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by hierarchy store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse error category for callers deciding how to surface a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    IndexOutOfRange,
    Validation,
}

/// Typed failure of one store operation. The prior snapshot stays current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    BoardNotFound(BoardId),
    ColumnNotFound(ColumnId),
    TaskNotFound(TaskId),
    /// Reorder index outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Allocator returned an id already used in the tree.
    DuplicateId(EntityId),
    Validation(ValidationError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BoardNotFound(_) | Self::ColumnNotFound(_) | Self::TaskNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::DuplicateId(_) | Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Stable snake_case label used in log events.
    pub(crate) fn label(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::IndexOutOfRange => "index_out_of_range",
            ErrorKind::Validation => "validation",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::ColumnNotFound(id) => write!(f, "column not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::DuplicateId(id) => write!(f, "id allocator returned duplicate id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
