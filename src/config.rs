//! Application configuration.
//!
//! Everything the core needs from its environment is carried in an explicit
//! [Config] handed in at startup; there are no process-wide constants to
//! edit.

use std::path::PathBuf;

use crate::category::DEFAULT_CATEGORIES;

/// The configuration for the expense tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the SQLite database. Created on first use.
    pub db_path: PathBuf,

    /// The category names suggested when entering an expense.
    pub categories: Vec<String>,
}

impl Config {
    /// Create a configuration for the database at `db_path` with the
    /// default suggested categories.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
        }
    }

    /// Replace the suggested categories.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }
}
