//! Column definitions.

use serde::{Deserialize, Serialize};

use super::types::DataType;
use super::value::Value;

/// A table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Whether the column is nullable.
    pub nullable: bool,
    /// Default value, if any.
    pub default: Option<Value>,
    /// Whether the column is an identity / auto-increment column.
    pub identity: bool,
    /// Sequence bound to the identity column, if the dialect uses one.
    pub sequence_name: Option<String>,
    /// Computed-column expression, if any. Columns with a formula
    /// never receive values in generated DML.
    pub formula: Option<String>,
    /// Zero-based position within the table. Unique per table.
    pub ordinal: u32,
}

impl Column {
    /// Creates a nullable column with the given name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            default: None,
            identity: false,
            sequence_name: None,
            formula: None,
            ordinal: 0,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as identity / auto-increment.
    #[must_use]
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self.nullable = false;
        self
    }

    /// Binds a sequence to the identity column.
    #[must_use]
    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = Some(name.into());
        self
    }

    /// Makes this a computed column with the given expression.
    #[must_use]
    pub fn formula(mut self, expression: impl Into<String>) -> Self {
        self.formula = Some(expression.into());
        self
    }

    /// Sets the ordinal position explicitly. Normally stamped by
    /// [`Table::column`](super::Table::column).
    #[must_use]
    pub const fn at(mut self, ordinal: u32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_flags() {
        let col = Column::new("id", DataType::Bigint).identity().sequence("seq_users_id");
        assert!(col.identity);
        assert!(!col.nullable);
        assert_eq!(col.sequence_name.as_deref(), Some("seq_users_id"));
    }
}
