//! Store configuration.
//!
//! # Invariants
//! - Starter column titles are normalized and non-blank.
//! - At least one starter column is configured.

use crate::model::text::{normalize_title, ValidationError};

/// Titles attached to every new board, in display order.
pub const DEFAULT_STARTER_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Construction-time settings of a [`crate::HierarchyStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    starter_columns: Vec<String>,
}

impl StoreConfig {
    /// Builds a config with custom starter columns.
    ///
    /// # Errors
    /// - `InvalidConfig` when no titles are given.
    /// - `BlankTitle` when any title is blank.
    pub fn with_starter_columns<I, S>(titles: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let starter_columns = titles
            .into_iter()
            .map(|title| normalize_title("column", title.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if starter_columns.is_empty() {
            return Err(ValidationError::InvalidConfig(
                "at least one starter column is required".to_string(),
            ));
        }
        Ok(Self { starter_columns })
    }

    pub fn starter_columns(&self) -> &[String] {
        &self.starter_columns
    }

    /// Config that bypasses validation; boards start with no columns.
    #[cfg(test)]
    pub(crate) fn without_starter_columns() -> Self {
        Self {
            starter_columns: Vec::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            starter_columns: DEFAULT_STARTER_COLUMNS
                .iter()
                .map(|title| (*title).to_string())
                .collect(),
        }
    }
}
