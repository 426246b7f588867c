//! Title normalization and field validation.
//!
//! # Invariants
//! - Normalized titles have no leading/trailing whitespace.
//! - Internal whitespace runs collapse to one ASCII space.
//! - Blank titles are rejected, never stored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required title is empty after trim.
    BlankTitle {
        /// Entity kind label (`board|column|task`).
        entity: &'static str,
    },
    /// Store configuration is unusable.
    InvalidConfig(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle { entity } => write!(f, "{entity} title must not be blank"),
            Self::InvalidConfig(message) => write!(f, "invalid store config: {message}"),
        }
    }
}

impl Error for ValidationError {}

/// Trims and collapses whitespace; rejects blank input.
pub fn normalize_title(entity: &'static str, value: &str) -> Result<String, ValidationError> {
    let collapsed = WHITESPACE_RE.replace_all(value.trim(), " ");
    if collapsed.is_empty() {
        return Err(ValidationError::BlankTitle { entity });
    }
    Ok(collapsed.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, ValidationError};

    #[test]
    fn normalize_title_collapses_inner_whitespace() {
        assert_eq!(
            normalize_title("task", "  Ship \t the\n\nrelease ").unwrap(),
            "Ship the release"
        );
    }

    #[test]
    fn normalize_title_rejects_blank() {
        let err = normalize_title("column", " \n\t ").unwrap_err();
        assert_eq!(err, ValidationError::BlankTitle { entity: "column" });
        assert_eq!(err.to_string(), "column title must not be blank");
    }
}
