//! View definitions.

use serde::{Deserialize, Serialize};

/// A view over a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// View name.
    pub name: String,
    /// The defining query, emitted verbatim after `AS`.
    pub query: String,
    /// Explicit column list, if any.
    pub columns: Vec<String>,
}

impl View {
    /// Creates a view with the given defining query.
    #[must_use]
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            columns: Vec::new(),
        }
    }

    /// Sets an explicit column list.
    #[must_use]
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|&c| String::from(c)).collect();
        self
    }
}
