//! MySQL dialect.

use std::collections::BTreeSet;

use crate::diff::{label, SchemaDiff};
use crate::model::{Column, Constraint, DataType, Index, IndexKind, Partitioning, Table};
use crate::options::Options;

use super::Dialect;

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_pair(&self) -> (char, char) {
        ('`', '`')
    }

    fn supports_sequences(&self) -> bool {
        false
    }

    fn supports_column_formula(&self) -> bool {
        true
    }

    fn supports_index_kind(&self, _table: Option<&Table>, _index: &Index, kind: IndexKind) -> bool {
        matches!(kind, IndexKind::BTree | IndexKind::Hash)
    }

    fn map_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Double => String::from("DOUBLE"),
            DataType::Boolean => String::from("TINYINT(1)"),
            DataType::Timestamp => String::from("DATETIME"),
            other => super::ansi_data_type(other),
        }
    }

    fn identity_clause(&self, _column: &Column) -> Option<String> {
        Some(String::from("AUTO_INCREMENT"))
    }

    fn column_definition(&self, options: &Options, column: &Column) -> String {
        let mut w = self.writer(options);
        w.ident(&column.name);
        w.raw(&self.map_data_type(&column.data_type));

        if let Some(formula) = &column.formula {
            w.kw("GENERATED ALWAYS AS").lparen().push(formula).rparen();
            return w.finish();
        }

        if !column.nullable {
            w.kw("NOT NULL");
        }
        if column.identity {
            w.kw("AUTO_INCREMENT");
        }
        if let Some(default) = &column.default {
            w.kw("DEFAULT").raw(&default.to_literal());
        }
        w.finish()
    }

    /// MySQL alters a column with one MODIFY COLUMN clause carrying
    /// the full target definition, whatever subset of properties
    /// changed. The clause keeps the pre-rename name; a pending
    /// rename is a separate statement.
    fn alter_column_sql(
        &self,
        options: &Options,
        table: &Table,
        original: &Column,
        target: &Column,
        _changed: &BTreeSet<String>,
    ) -> Vec<String> {
        let mut modified = target.clone();
        modified.name = original.name.clone();
        let mut w = self.writer(options);
        w.kw("ALTER TABLE");
        let schema = table.schema.as_deref().filter(|_| options.decorate_schema_name);
        w.qualified(schema, &table.name);
        w.kw("MODIFY COLUMN").raw(&self.column_definition(options, &modified));
        vec![w.finish()]
    }

    fn drop_constraint_sql(&self, options: &Options, constraint: &Constraint) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE").ident(constraint.table());
        match constraint {
            Constraint::PrimaryKey { .. } => {
                w.kw("DROP PRIMARY KEY");
            }
            Constraint::ForeignKey { name, .. } => {
                w.kw("DROP FOREIGN KEY").ident(name);
            }
            Constraint::Unique { name, .. } => {
                w.kw("DROP INDEX").ident(name);
            }
            Constraint::Check { name, .. } | Constraint::Exclude { name, .. } => {
                w.kw("DROP CHECK").ident(name);
            }
        }
        w.finish()
    }

    fn drop_index_sql(&self, options: &Options, index: &Index) -> String {
        let mut w = self.writer(options);
        w.kw("DROP INDEX").ident(&index.name).kw("ON").ident(&index.table);
        w.finish()
    }

    fn partition_by_clause(&self, options: &Options, partitioning: &Partitioning) -> Option<String> {
        let mut w = self.writer(options);
        w.kw("PARTITION BY").kw(partitioning.method.as_sql()).lparen();
        w.ident_list(&partitioning.columns);
        w.rparen();
        Some(w.finish())
    }

    fn alter_schema_property_sql(&self, options: &Options, diff: &SchemaDiff) -> Vec<String> {
        let Some(target) = diff.target() else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if diff.changed().contains(label::CHARACTER_SET) || diff.changed().contains(label::COLLATION)
        {
            let mut w = self.writer(options);
            w.kw("ALTER DATABASE").ident(&target.name);
            if let Some(character_set) = &target.character_set {
                w.kw("CHARACTER SET").raw(character_set);
            }
            if let Some(collation) = &target.collation {
                w.kw("COLLATE").raw(collation);
            }
            out.push(w.finish());
        }
        out
    }
}
