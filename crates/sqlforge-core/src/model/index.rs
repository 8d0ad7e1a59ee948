//! Index definitions.

use serde::{Deserialize, Serialize};

/// Index access method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexKind {
    /// B-tree index (default).
    #[default]
    BTree,
    /// Hash index.
    Hash,
    /// GiST index (PostgreSQL).
    Gist,
    /// GIN index (PostgreSQL).
    Gin,
}

/// A named index on a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Owning table. Stamped by [`Table::index`](super::Table::index).
    pub table: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether this is a UNIQUE index.
    pub unique: bool,
    /// Access method.
    pub kind: IndexKind,
    /// Partial index condition (WHERE clause body), if any.
    pub where_clause: Option<String>,
}

impl Index {
    /// Creates a non-unique B-tree index.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            table: String::new(),
            columns: columns.iter().map(|&c| String::from(c)).collect(),
            unique: false,
            kind: IndexKind::BTree,
            where_clause: None,
        }
    }

    /// Marks the index UNIQUE.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the access method.
    #[must_use]
    pub const fn using(mut self, kind: IndexKind) -> Self {
        self.kind = kind;
        self
    }

    /// Makes this a partial index with the given condition.
    #[must_use]
    pub fn filtered(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }
}
