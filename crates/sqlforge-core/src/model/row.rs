//! Rows of data, for DML generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::table::Table;
use super::value::Value;

/// One row of data: column name to value.
///
/// Columns without an entry fall back to the column default (or NULL)
/// during value derivation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Values by column name.
    pub values: BTreeMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Looks up a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

/// A homogeneous batch of rows belonging to one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    /// The owning table, carrying the column metadata the DML
    /// builders consult.
    pub table: Table,
    /// The rows.
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Creates an empty row set for a table.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self {
            table,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    #[must_use]
    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}
