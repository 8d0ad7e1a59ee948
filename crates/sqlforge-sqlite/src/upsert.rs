//! Native UPSERT builder.
//!
//! Replaces the core's composite row MERGE (insert-select followed
//! by update-by-key) with SQLite's `INSERT ... ON CONFLICT DO
//! UPDATE`, one statement per policy-sized chunk of rows.

use tracing::debug;

use sqlforge_core::model::{Column, Row, RowSet, SchemaObject, Table, Value};
use sqlforge_core::{
    GenContext, GenerateError, Result, Statement, StatementBuilder, StatementKind,
};

/// Builds `INSERT ... ON CONFLICT (pk) DO UPDATE` statements.
pub struct SqliteUpsertBuilder;

fn insert_columns<'t>(ctx: &GenContext<'_>, table: &'t Table) -> Vec<&'t Column> {
    let policy = &ctx.options.table;
    table
        .columns
        .iter()
        .filter(|c| c.formula.is_none())
        .filter(|c| (policy.insertable)(table, c))
        .filter(|c| !(policy.auto_increment)(table, c))
        .collect()
}

fn key_names(ctx: &GenContext<'_>, table: &Table) -> Vec<String> {
    if let Some(pk) = table.primary_key() {
        return pk.columns().to_vec();
    }
    let policy = &ctx.options.table;
    table
        .columns
        .iter()
        .filter(|c| (policy.auto_increment)(table, c))
        .map(|c| c.name.clone())
        .collect()
}

fn insert_value(ctx: &GenContext<'_>, table: &Table, column: &Column, row: &Row) -> String {
    let policy = &ctx.options.table;
    if (policy.created_at)(table, column) || (policy.updated_at)(table, column) {
        return String::from(ctx.dialect.current_timestamp());
    }
    if (policy.optimistic_lock)(table, column) {
        return column
            .default
            .as_ref()
            .map_or_else(|| String::from("0"), Value::to_literal);
    }
    row.get(&column.name)
        .map(Value::to_literal)
        .or_else(|| column.default.as_ref().map(Value::to_literal))
        .unwrap_or_else(|| String::from("NULL"))
}

impl StatementBuilder for SqliteUpsertBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::MergeRow
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let SchemaObject::Rows(rows) = object else {
            return Err(GenerateError::UnsupportedObject {
                kind: self.kind(),
                expected: sqlforge_core::model::ObjectKind::Rows,
                actual: object.kind(),
            });
        };
        if rows.rows.is_empty() {
            return Ok(Vec::new());
        }
        let table = &rows.table;
        let columns = insert_columns(ctx, table);
        let keys = key_names(ctx, table);
        if keys.is_empty() {
            debug!(table = %table.name, "no key columns, plain insert instead of upsert");
        }
        let updatable: Vec<&Column> = columns
            .iter()
            .copied()
            .filter(|c| !keys.contains(&c.name))
            .collect();

        let mut out = Vec::new();
        for chunk in rows.rows.chunks(ctx.options.table.dml_batch_size.max(1)) {
            let mut w = ctx.writer();
            w.kw("INSERT INTO").ident(&table.name).lparen();
            w.ident_list(&columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>());
            w.rparen().kw("VALUES");

            let tuples: Vec<String> = chunk
                .iter()
                .map(|row| {
                    let values: Vec<String> = columns
                        .iter()
                        .map(|c| insert_value(ctx, table, c, row))
                        .collect();
                    format!("({})", values.join(", "))
                })
                .collect();
            w.raw(&tuples.join(", "));

            if !keys.is_empty() {
                w.kw("ON CONFLICT").lparen();
                w.ident_list(&keys);
                w.rparen();
                if updatable.is_empty() {
                    w.kw("DO NOTHING");
                } else {
                    let sets: Vec<String> = updatable
                        .iter()
                        .map(|c| {
                            let name = ctx.dialect.quote(&ctx.options, &c.name);
                            format!("{name} = excluded.{name}")
                        })
                        .collect();
                    w.kw("DO UPDATE SET").raw(&sets.join(", "));
                }
            }

            out.push(
                Statement::new(self.kind(), w.finish()).with_target(RowSet {
                    table: table.clone(),
                    rows: chunk.to_vec(),
                }),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sqlite_registry, SqliteDialect};
    use sqlforge_core::model::{Constraint, DataType};
    use sqlforge_core::Options;

    fn settings() -> Table {
        Table::new("settings")
            .column(Column::new("key", DataType::Text).not_null())
            .column(Column::new("value", DataType::Text))
            .constraint(Constraint::primary_key("pk_settings", &["key"]))
    }

    #[test]
    fn merge_row_resolves_to_native_upsert() {
        let registry = sqlite_registry();
        let dialect = SqliteDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let rows = RowSet::new(settings())
            .row(Row::new().set("key", "theme").set("value", "dark"));
        let stmts = ctx
            .build(StatementKind::MergeRow, &SchemaObject::Rows(rows))
            .expect("upsert");

        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].text(),
            "INSERT INTO settings (key, value) VALUES ('theme', 'dark') \
             ON CONFLICT (key) DO UPDATE SET value = excluded.value"
        );
    }

    #[test]
    fn identity_columns_are_omitted_from_the_insert() {
        let registry = sqlite_registry();
        let dialect = SqliteDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let table = Table::new("notes")
            .column(Column::new("id", DataType::Integer).identity())
            .column(Column::new("body", DataType::Text).not_null());
        let rows = RowSet::new(table).row(Row::new().set("body", "hi"));
        let stmts = ctx
            .build(StatementKind::InsertRow, &SchemaObject::Rows(rows))
            .expect("insert");
        assert_eq!(stmts[0].text(), "INSERT INTO notes (body) VALUES ('hi')");
    }
}
