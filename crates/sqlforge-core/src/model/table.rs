//! Table definitions.

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::constraint::Constraint;
use super::index::Index;

/// Partitioning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionMethod {
    /// Range partitioning.
    Range,
    /// List partitioning.
    List,
    /// Hash partitioning.
    Hash,
}

impl PartitionMethod {
    /// Returns the SQL keyword for the method.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Range => "RANGE",
            Self::List => "LIST",
            Self::Hash => "HASH",
        }
    }
}

/// Table partitioning definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partitioning {
    /// Partitioning method.
    pub method: PartitionMethod,
    /// Partitioning key columns.
    pub columns: Vec<String>,
}

impl Partitioning {
    /// Creates a partitioning definition.
    #[must_use]
    pub fn new(method: PartitionMethod, columns: &[&str]) -> Self {
        Self {
            method,
            columns: columns.iter().map(|&c| String::from(c)).collect(),
        }
    }
}

/// A table: columns plus constraints, indexes and optional
/// partitioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Owning schema, if qualified.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
    /// Columns, in ordinal order.
    pub columns: Vec<Column>,
    /// Table-level constraints.
    pub constraints: Vec<Constraint>,
    /// Indexes.
    pub indexes: Vec<Index>,
    /// Partitioning definition, if any.
    pub partitioning: Option<Partitioning>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
            partitioning: None,
        }
    }

    /// Qualifies the table with a schema name.
    #[must_use]
    pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Appends a column, stamping its ordinal position.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn column(mut self, mut column: Column) -> Self {
        column.ordinal = self.columns.len() as u32;
        self.columns.push(column);
        self
    }

    /// Appends a constraint, stamping the owning table name.
    #[must_use]
    pub fn constraint(mut self, mut constraint: Constraint) -> Self {
        constraint.set_table(&self.name);
        self.constraints.push(constraint);
        self
    }

    /// Appends an index, stamping the owning table name.
    #[must_use]
    pub fn index(mut self, mut index: Index) -> Self {
        index.table = self.name.clone();
        self.indexes.push(index);
        self
    }

    /// Sets the partitioning definition.
    #[must_use]
    pub fn partitioned_by(mut self, partitioning: Partitioning) -> Self {
        self.partitioning = Some(partitioning);
        self
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key constraint, if declared.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.is_primary_key())
    }

    /// Names of tables this table references through foreign keys
    /// (self-references excluded).
    #[must_use]
    pub fn referenced_tables(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::ForeignKey { ref_table, .. } if *ref_table != self.name => {
                    Some(ref_table.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DataType;

    #[test]
    fn column_ordinals_are_stamped() {
        let t = Table::new("users")
            .column(Column::new("id", DataType::Bigint).identity())
            .column(Column::new("email", DataType::Varchar(Some(255))));
        assert_eq!(t.columns[0].ordinal, 0);
        assert_eq!(t.columns[1].ordinal, 1);
    }

    #[test]
    fn constraint_and_index_table_names_are_stamped() {
        let t = Table::new("orders")
            .column(Column::new("id", DataType::Bigint))
            .constraint(Constraint::primary_key("pk_orders", &["id"]))
            .index(Index::new("ix_orders_id", &["id"]));
        assert_eq!(t.constraints[0].table(), "orders");
        assert_eq!(t.indexes[0].table, "orders");
    }

    #[test]
    fn referenced_tables_skips_self_references() {
        let t = Table::new("employees")
            .column(Column::new("id", DataType::Bigint))
            .constraint(Constraint::foreign_key(
                "fk_emp_mgr",
                &["manager_id"],
                "employees",
                &["id"],
            ))
            .constraint(Constraint::foreign_key(
                "fk_emp_dept",
                &["dept_id"],
                "departments",
                &["id"],
            ));
        assert_eq!(t.referenced_tables(), vec!["departments"]);
    }
}
