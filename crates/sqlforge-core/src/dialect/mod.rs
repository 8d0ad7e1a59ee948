//! Dialect-specific syntax and capabilities.
//!
//! A [`Dialect`] supplies the statement builders with everything that
//! varies between engines: quoting characters, type mapping, identity
//! clauses, the shape of ALTER COLUMN, and capability queries used to
//! gate optional clauses. Unsupported features are omitted from the
//! emitted SQL, never raised as errors.
//!
//! Default method bodies implement ANSI-flavored syntax; concrete
//! dialects override only where they diverge.

mod generic;
mod mysql;
mod postgres;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use std::collections::BTreeSet;

use crate::diff::{label, SchemaDiff, TableDiff};
use crate::model::{
    Column, Constraint, DataType, DbDataType, Index, IndexKind, Partitioning, Table,
};
use crate::options::Options;
use crate::stmt::Statement;
use crate::writer::SqlWriter;

/// Dialect-specific SQL syntax and capability provider.
pub trait Dialect: Send + Sync {
    /// The dialect name.
    fn name(&self) -> &'static str;

    /// Identifier quote characters (open, close).
    fn quote_pair(&self) -> (char, char) {
        ('"', '"')
    }

    /// Creates a writer configured with this dialect's quoting.
    fn writer(&self, options: &Options) -> SqlWriter {
        let (open, close) = self.quote_pair();
        SqlWriter::new(open, close, options.quote)
    }

    /// Quotes one identifier per the caller's policy.
    fn quote(&self, options: &Options, name: &str) -> String {
        self.writer(options).quoted(name)
    }

    /// Whether the identifier would be quoted under an as-needed
    /// policy.
    fn need_quote(&self, name: &str) -> bool {
        SqlWriter::needs_quote(name)
    }

    // ---- capabilities ------------------------------------------

    /// Whether DROP ... CASCADE is supported.
    fn supports_drop_cascade(&self) -> bool {
        false
    }

    /// Whether IF EXISTS / IF NOT EXISTS guards are supported.
    fn supports_exists_guards(&self) -> bool {
        true
    }

    /// Whether computed (generated) columns are supported.
    fn supports_column_formula(&self) -> bool {
        false
    }

    /// Whether the index access method is supported for the given
    /// table/index pair.
    fn supports_index_kind(&self, _table: Option<&Table>, _index: &Index, kind: IndexKind) -> bool {
        kind == IndexKind::BTree
    }

    /// Whether partial (filtered) indexes are supported.
    fn supports_partial_indexes(&self) -> bool {
        false
    }

    /// Whether standard OFFSET ... FETCH ... ROWS pagination is
    /// supported.
    fn supports_standard_offset_fetch_rows(&self) -> bool {
        false
    }

    /// Whether sequences exist.
    fn supports_sequences(&self) -> bool {
        true
    }

    /// Whether domains exist.
    fn supports_domains(&self) -> bool {
        false
    }

    /// Whether exclusion constraints exist.
    fn supports_exclude_constraints(&self) -> bool {
        false
    }

    /// Whether SET search_path exists.
    fn supports_set_search_path(&self) -> bool {
        false
    }

    // ---- atoms -------------------------------------------------

    /// The literal to place in a VALUES list for an identity column,
    /// or `None` when identity columns must be omitted instead.
    fn identity_insert_literal(&self) -> Option<&'static str> {
        Some("DEFAULT")
    }

    /// The current-timestamp expression.
    fn current_timestamp(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Maps an abstract data type to this dialect's type literal.
    fn map_data_type(&self, data_type: &DataType) -> String {
        ansi_data_type(data_type)
    }

    /// Resolves a column's type with family and natural default.
    fn db_data_type(&self, column: &Column) -> DbDataType {
        let family = column.data_type.family();
        let default_literal = match family {
            crate::model::TypeFamily::Numeric => Some(String::from("0")),
            crate::model::TypeFamily::Character => Some(String::from("''")),
            crate::model::TypeFamily::Boolean => Some(String::from("FALSE")),
            crate::model::TypeFamily::DateTime => Some(String::from(self.current_timestamp())),
            _ => None,
        };
        DbDataType {
            literal: self.map_data_type(&column.data_type),
            family,
            default_literal,
        }
    }

    /// The identity/auto-increment clause appended to a column
    /// definition, if this dialect expresses identity that way.
    fn identity_clause(&self, column: &Column) -> Option<String> {
        let _ = column;
        Some(String::from("GENERATED BY DEFAULT AS IDENTITY"))
    }

    /// Renders one column definition for CREATE TABLE / ADD COLUMN.
    fn column_definition(&self, options: &Options, column: &Column) -> String {
        let mut w = self.writer(options);
        w.ident(&column.name);

        if let (Some(formula), true) = (&column.formula, self.supports_column_formula()) {
            w.raw(&self.map_data_type(&column.data_type));
            w.kw("GENERATED ALWAYS AS").lparen().push(formula).rparen();
            return w.finish();
        }

        w.raw(&self.map_data_type(&column.data_type));
        if column.identity {
            if let Some(clause) = self.identity_clause(column) {
                w.raw(&clause);
            }
        }
        if !column.nullable {
            w.kw("NOT NULL");
        }
        if let Some(default) = &column.default {
            w.kw("DEFAULT").raw(&default.to_literal());
        }
        w.finish()
    }

    /// Renders an inline constraint fragment for CREATE TABLE, or
    /// `None` when the constraint kind is unsupported (it is then
    /// omitted, not an error).
    fn constraint_definition(&self, options: &Options, constraint: &Constraint) -> Option<String> {
        let mut w = self.writer(options);
        match constraint {
            Constraint::PrimaryKey { name, columns, .. } => {
                w.kw("CONSTRAINT").ident(name).kw("PRIMARY KEY").lparen();
                w.ident_list(columns);
                w.rparen();
            }
            Constraint::Unique { name, columns, .. } => {
                w.kw("CONSTRAINT").ident(name).kw("UNIQUE").lparen();
                w.ident_list(columns);
                w.rparen();
            }
            Constraint::Check {
                name, expression, ..
            } => {
                w.kw("CONSTRAINT").ident(name).kw("CHECK").lparen();
                w.push(expression);
                w.rparen();
            }
            Constraint::Exclude {
                name,
                using,
                elements,
                ..
            } => {
                if !self.supports_exclude_constraints() {
                    return None;
                }
                w.kw("CONSTRAINT").ident(name).kw("EXCLUDE");
                if let Some(method) = using {
                    w.kw("USING").raw(method);
                }
                w.lparen().push(elements).rparen();
            }
            Constraint::ForeignKey {
                name,
                columns,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
                ..
            } => {
                w.kw("CONSTRAINT").ident(name).kw("FOREIGN KEY").lparen();
                w.ident_list(columns);
                w.rparen().kw("REFERENCES").ident(ref_table).lparen();
                w.ident_list(ref_columns);
                w.rparen();
                if let Some(action) = on_delete {
                    w.kw("ON DELETE").kw(action.as_sql());
                }
                if let Some(action) = on_update {
                    w.kw("ON UPDATE").kw(action.as_sql());
                }
            }
        }
        Some(w.finish())
    }

    /// Renders ALTER TABLE ... RENAME TO ...
    fn rename_table_sql(&self, options: &Options, original: &Table, new_name: &str) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE");
        let schema = original.schema.as_deref().filter(|_| options.decorate_schema_name);
        w.qualified(schema, &original.name);
        w.kw("RENAME TO").ident(new_name);
        w.finish()
    }

    /// Renders ALTER TABLE ... RENAME COLUMN ...
    fn rename_column_sql(
        &self,
        options: &Options,
        table: &Table,
        old_name: &str,
        new_name: &str,
    ) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE");
        let schema = table.schema.as_deref().filter(|_| options.decorate_schema_name);
        w.qualified(schema, &table.name);
        w.kw("RENAME COLUMN").ident(old_name).kw("TO").ident(new_name);
        w.finish()
    }

    /// Renders the statements altering one column's definition.
    /// ANSI shape: one ALTER TABLE ... ALTER COLUMN clause per
    /// changed property. Dialects with a single-clause MODIFY syntax
    /// override this.
    fn alter_column_sql(
        &self,
        options: &Options,
        table: &Table,
        original: &Column,
        target: &Column,
        changed: &BTreeSet<String>,
    ) -> Vec<String> {
        let schema = table.schema.as_deref().filter(|_| options.decorate_schema_name);
        let prefix = {
            let mut w = self.writer(options);
            w.kw("ALTER TABLE");
            w.qualified(schema, &table.name);
            // The pre-rename name: a combined alter+rename always
            // alters first.
            w.kw("ALTER COLUMN").ident(&original.name);
            w.finish()
        };

        let mut out = Vec::new();
        if changed.contains(label::DATA_TYPE) {
            out.push(format!(
                "{prefix} SET DATA TYPE {}",
                self.map_data_type(&target.data_type)
            ));
        }
        if changed.contains(label::NULLABLE) {
            if target.nullable {
                out.push(format!("{prefix} DROP NOT NULL"));
            } else {
                out.push(format!("{prefix} SET NOT NULL"));
            }
        }
        if changed.contains(label::DEFAULT) {
            match &target.default {
                Some(default) => {
                    out.push(format!("{prefix} SET DEFAULT {}", default.to_literal()));
                }
                None => out.push(format!("{prefix} DROP DEFAULT")),
            }
        }
        out
    }

    /// Renders ALTER TABLE ... ADD COLUMN ...
    fn add_column_sql(&self, options: &Options, table: &Table, column: &Column) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE");
        let schema = table.schema.as_deref().filter(|_| options.decorate_schema_name);
        w.qualified(schema, &table.name);
        w.kw("ADD COLUMN").raw(&self.column_definition(options, column));
        w.finish()
    }

    /// Renders ALTER TABLE ... DROP COLUMN ...
    fn drop_column_sql(&self, options: &Options, table: &Table, column: &Column) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE");
        let schema = table.schema.as_deref().filter(|_| options.decorate_schema_name);
        w.qualified(schema, &table.name);
        w.kw("DROP COLUMN").ident(&column.name);
        w.finish()
    }

    /// Renders ALTER TABLE ... ADD CONSTRAINT, or `None` for an
    /// unsupported constraint kind.
    fn add_constraint_sql(&self, options: &Options, constraint: &Constraint) -> Option<String> {
        let definition = self.constraint_definition(options, constraint)?;
        let mut w = self.writer(options);
        w.kw("ALTER TABLE").ident(constraint.table()).kw("ADD").raw(&definition);
        Some(w.finish())
    }

    /// Renders ALTER TABLE ... DROP CONSTRAINT.
    fn drop_constraint_sql(&self, options: &Options, constraint: &Constraint) -> String {
        let mut w = self.writer(options);
        w.kw("ALTER TABLE").ident(constraint.table());
        w.kw("DROP CONSTRAINT").ident(constraint.name());
        w.finish()
    }

    /// Renders CREATE INDEX. The access method and the partial-index
    /// condition are emitted only where supported.
    fn create_index_sql(&self, options: &Options, table: Option<&Table>, index: &Index) -> String {
        let mut w = self.writer(options);
        w.kw("CREATE");
        if index.unique {
            w.kw("UNIQUE");
        }
        w.kw("INDEX").ident(&index.name).kw("ON").ident(&index.table);
        if index.kind != IndexKind::BTree && self.supports_index_kind(table, index, index.kind) {
            w.kw("USING").kw(index_kind_sql(index.kind));
        }
        w.lparen();
        w.ident_list(&index.columns);
        w.rparen();
        if let (Some(condition), true) = (&index.where_clause, self.supports_partial_indexes()) {
            w.kw("WHERE").raw(condition);
        }
        w.finish()
    }

    /// Renders DROP INDEX.
    fn drop_index_sql(&self, options: &Options, index: &Index) -> String {
        let mut w = self.writer(options);
        w.kw("DROP INDEX");
        if options.drop_if_exists && self.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&index.name);
        w.finish()
    }

    /// Renders the PARTITION BY clause of CREATE TABLE, or `None`
    /// when partitioning is unsupported (it is then omitted).
    fn partition_by_clause(&self, options: &Options, partitioning: &Partitioning) -> Option<String> {
        let _ = (options, partitioning);
        None
    }

    /// Hook: statements realizing a partitioning change. Default
    /// no-op; dialect-supplied.
    fn alter_partitioning_sql(&self, options: &Options, diff: &TableDiff) -> Vec<Statement> {
        let _ = (options, diff);
        Vec::new()
    }

    /// Hook: dialect-specific trailing statements appended to an
    /// ALTER TABLE sequence. Default no-op.
    fn table_alter_extras(&self, options: &Options, diff: &TableDiff) -> Vec<Statement> {
        let _ = (options, diff);
        Vec::new()
    }

    /// Renders statements for changed schema-level properties
    /// (character set, collation). Default: unsupported, omitted.
    fn alter_schema_property_sql(&self, options: &Options, diff: &SchemaDiff) -> Vec<String> {
        let _ = (options, diff);
        Vec::new()
    }

    /// Renders SET search_path, or `None` when unsupported.
    fn search_path_sql(&self, options: &Options, schema_name: &str) -> Option<String> {
        let _ = (options, schema_name);
        None
    }

    /// Renders DROP TRIGGER.
    fn drop_trigger_sql(&self, options: &Options, trigger: &crate::model::Trigger) -> String {
        let mut w = self.writer(options);
        w.kw("DROP TRIGGER").ident(&trigger.name);
        w.finish()
    }
}

/// The SQL keyword for an index access method.
#[must_use]
pub const fn index_kind_sql(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::BTree => "BTREE",
        IndexKind::Hash => "HASH",
        IndexKind::Gist => "GIST",
        IndexKind::Gin => "GIN",
    }
}

/// The ANSI type mapping shared by the trait default and the
/// dialects that only override a few entries.
#[must_use]
pub fn ansi_data_type(data_type: &DataType) -> String {
    match data_type {
        DataType::Smallint => String::from("SMALLINT"),
        DataType::Integer => String::from("INTEGER"),
        DataType::Bigint => String::from("BIGINT"),
        DataType::Real => String::from("REAL"),
        DataType::Double => String::from("DOUBLE PRECISION"),
        DataType::Decimal { precision, scale } => match (precision, scale) {
            (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
            (Some(p), None) => format!("DECIMAL({p})"),
            _ => String::from("DECIMAL"),
        },
        DataType::Char(len) => len.map_or_else(|| String::from("CHAR"), |n| format!("CHAR({n})")),
        DataType::Varchar(len) => {
            len.map_or_else(|| String::from("VARCHAR"), |n| format!("VARCHAR({n})"))
        }
        DataType::Text => String::from("TEXT"),
        DataType::Blob => String::from("BLOB"),
        DataType::Binary(len) => {
            len.map_or_else(|| String::from("BINARY"), |n| format!("BINARY({n})"))
        }
        DataType::Varbinary(len) => {
            len.map_or_else(|| String::from("VARBINARY"), |n| format!("VARBINARY({n})"))
        }
        DataType::Date => String::from("DATE"),
        DataType::Time => String::from("TIME"),
        DataType::Timestamp => String::from("TIMESTAMP"),
        DataType::Boolean => String::from("BOOLEAN"),
        DataType::Custom(name) => name.clone(),
    }
}
