//! Table constraints.

use serde::{Deserialize, Serialize};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A named table constraint.
///
/// The owning table's name is carried on the constraint itself
/// (stamped by [`Table::constraint`](super::Table::constraint)) so a
/// constraint can be dropped or created standalone, outside a CREATE
/// TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// Primary key.
    PrimaryKey {
        /// Constraint name.
        name: String,
        /// Owning table.
        table: String,
        /// Key columns, in order.
        columns: Vec<String>,
    },
    /// Unique constraint.
    Unique {
        /// Constraint name.
        name: String,
        /// Owning table.
        table: String,
        /// Covered columns, in order.
        columns: Vec<String>,
    },
    /// Check constraint.
    Check {
        /// Constraint name.
        name: String,
        /// Owning table.
        table: String,
        /// Check expression (without the surrounding parentheses).
        expression: String,
    },
    /// Exclusion constraint (PostgreSQL-style).
    Exclude {
        /// Constraint name.
        name: String,
        /// Owning table.
        table: String,
        /// Index method, if any (e.g. `gist`).
        using: Option<String>,
        /// Exclusion elements, emitted verbatim.
        elements: String,
    },
    /// Foreign key.
    ForeignKey {
        /// Constraint name.
        name: String,
        /// Owning table.
        table: String,
        /// Referencing columns, in order.
        columns: Vec<String>,
        /// Referenced table.
        ref_table: String,
        /// Referenced columns, in order.
        ref_columns: Vec<String>,
        /// ON DELETE action.
        on_delete: Option<ReferentialAction>,
        /// ON UPDATE action.
        on_update: Option<ReferentialAction>,
    },
}

impl Constraint {
    /// Creates a primary key constraint.
    #[must_use]
    pub fn primary_key(name: impl Into<String>, columns: &[&str]) -> Self {
        Self::PrimaryKey {
            name: name.into(),
            table: String::new(),
            columns: columns.iter().map(|&c| String::from(c)).collect(),
        }
    }

    /// Creates a unique constraint.
    #[must_use]
    pub fn unique(name: impl Into<String>, columns: &[&str]) -> Self {
        Self::Unique {
            name: name.into(),
            table: String::new(),
            columns: columns.iter().map(|&c| String::from(c)).collect(),
        }
    }

    /// Creates a check constraint.
    #[must_use]
    pub fn check(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Check {
            name: name.into(),
            table: String::new(),
            expression: expression.into(),
        }
    }

    /// Creates a foreign key constraint.
    #[must_use]
    pub fn foreign_key(
        name: impl Into<String>,
        columns: &[&str],
        ref_table: impl Into<String>,
        ref_columns: &[&str],
    ) -> Self {
        Self::ForeignKey {
            name: name.into(),
            table: String::new(),
            columns: columns.iter().map(|&c| String::from(c)).collect(),
            ref_table: ref_table.into(),
            ref_columns: ref_columns.iter().map(|&c| String::from(c)).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action of a foreign key. No-op for other
    /// constraint kinds.
    #[must_use]
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        if let Self::ForeignKey { on_delete, .. } = &mut self {
            *on_delete = Some(action);
        }
        self
    }

    /// Sets the ON UPDATE action of a foreign key. No-op for other
    /// constraint kinds.
    #[must_use]
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        if let Self::ForeignKey { on_update, .. } = &mut self {
            *on_update = Some(action);
        }
        self
    }

    /// The constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PrimaryKey { name, .. }
            | Self::Unique { name, .. }
            | Self::Check { name, .. }
            | Self::Exclude { name, .. }
            | Self::ForeignKey { name, .. } => name,
        }
    }

    /// The owning table's name.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::PrimaryKey { table, .. }
            | Self::Unique { table, .. }
            | Self::Check { table, .. }
            | Self::Exclude { table, .. }
            | Self::ForeignKey { table, .. } => table,
        }
    }

    pub(crate) fn set_table(&mut self, table_name: &str) {
        match self {
            Self::PrimaryKey { table, .. }
            | Self::Unique { table, .. }
            | Self::Check { table, .. }
            | Self::Exclude { table, .. }
            | Self::ForeignKey { table, .. } => *table = String::from(table_name),
        }
    }

    /// The columns this constraint covers in the owning table.
    /// Empty for check and exclusion constraints.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        match self {
            Self::PrimaryKey { columns, .. }
            | Self::Unique { columns, .. }
            | Self::ForeignKey { columns, .. } => columns,
            Self::Check { .. } | Self::Exclude { .. } => &[],
        }
    }

    /// Whether this is a primary key constraint.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKey { .. })
    }

    /// Whether this is a foreign key constraint.
    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey { .. })
    }
}
