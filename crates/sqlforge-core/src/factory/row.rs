//! Row DML builders.
//!
//! All value derivation funnels through one decision function that
//! consults, in priority order: formula columns (skipped),
//! auto-increment columns (identity literal or skipped), created-at
//! and updated-at columns (current timestamp), optimistic-lock
//! columns (increment on update, default on insert), then the plain
//! row value with optional COALESCE wrapping for nullable numerics.

use tracing::debug;

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::{Column, Row, RowSet, SchemaObject, Table, TypeFamily};
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_rows, qualified_table, StatementBuilder};

/// Which side of the DML a value lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DmlPhase {
    Insert,
    Update,
}

/// Derives the expression for one column, or `None` when the column
/// must be omitted from the statement.
fn value_expr(
    ctx: &GenContext<'_>,
    table: &Table,
    column: &Column,
    row: &Row,
    phase: DmlPhase,
) -> Option<String> {
    let policy = &ctx.options.table;

    if column.formula.is_some() {
        return None;
    }
    if (policy.auto_increment)(table, column) {
        return match phase {
            DmlPhase::Insert => ctx.dialect.identity_insert_literal().map(String::from),
            DmlPhase::Update => None,
        };
    }
    if (policy.created_at)(table, column) {
        return match phase {
            DmlPhase::Insert => Some(String::from(ctx.dialect.current_timestamp())),
            DmlPhase::Update => None,
        };
    }
    if (policy.updated_at)(table, column) {
        let now = String::from(ctx.dialect.current_timestamp());
        return match phase {
            DmlPhase::Insert => Some(now),
            DmlPhase::Update => policy.update_updated_at.then_some(now),
        };
    }
    if (policy.optimistic_lock)(table, column) {
        return match phase {
            DmlPhase::Insert => {
                let resolved = ctx.dialect.db_data_type(column);
                Some(
                    column
                        .default
                        .as_ref()
                        .map(crate::model::Value::to_literal)
                        .or(resolved.default_literal)
                        .unwrap_or_else(|| String::from("0")),
                )
            }
            DmlPhase::Update => {
                let name = ctx.dialect.quote(&ctx.options, &column.name);
                Some(format!("{name} + 1"))
            }
        };
    }

    let literal = row
        .get(&column.name)
        .map(crate::model::Value::to_literal)
        .or_else(|| column.default.as_ref().map(crate::model::Value::to_literal))
        .unwrap_or_else(|| String::from("NULL"));

    let coalesce = match phase {
        DmlPhase::Insert => policy.coalesce_on_insert,
        DmlPhase::Update => policy.coalesce_on_update,
    };
    if coalesce && column.nullable && column.data_type.family() == TypeFamily::Numeric {
        let resolved = ctx.dialect.db_data_type(column);
        let fallback = resolved.default_literal.unwrap_or_else(|| String::from("0"));
        return Some(format!("COALESCE({literal}, {fallback})"));
    }
    Some(literal)
}

/// Columns included in a generated INSERT.
fn insert_columns<'t>(ctx: &GenContext<'_>, table: &'t Table) -> Vec<&'t Column> {
    let policy = &ctx.options.table;
    table
        .columns
        .iter()
        .filter(|c| (policy.insertable)(table, c))
        .filter(|c| c.formula.is_none())
        .filter(|c| {
            !(policy.auto_increment)(table, c) || ctx.dialect.identity_insert_literal().is_some()
        })
        .collect()
}

/// The key columns used in PK-keyed DML: the primary key constraint
/// when declared, identity columns otherwise.
fn key_columns<'t>(ctx: &GenContext<'_>, table: &'t Table) -> Vec<&'t Column> {
    if let Some(pk) = table.primary_key() {
        return pk
            .columns()
            .iter()
            .filter_map(|name| table.find_column(name))
            .collect();
    }
    let policy = &ctx.options.table;
    table
        .columns
        .iter()
        .filter(|c| (policy.auto_increment)(table, c))
        .collect()
}

fn key_predicates(ctx: &GenContext<'_>, keys: &[&Column], row: &Row) -> String {
    keys.iter()
        .map(|c| {
            let name = ctx.dialect.quote(&ctx.options, &c.name);
            let value = row
                .get(&c.name)
                .map_or_else(|| String::from("NULL"), crate::model::Value::to_literal);
            format!("{name} = {value}")
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn chunked(rows: &RowSet, batch_size: usize) -> impl Iterator<Item = RowSet> + '_ {
    rows.rows.chunks(batch_size.max(1)).map(move |chunk| RowSet {
        table: rows.table.clone(),
        rows: chunk.to_vec(),
    })
}

/// Builds multi-row INSERT statements, one per policy-sized chunk.
pub struct InsertRowBuilder;

impl StatementBuilder for InsertRowBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::InsertRow
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let rows = expect_rows(self.kind(), object)?;
        if rows.rows.is_empty() {
            return Ok(Vec::new());
        }
        let table = &rows.table;
        let columns = insert_columns(ctx, table);

        let mut out = Vec::new();
        for chunk in chunked(rows, ctx.options.table.dml_batch_size) {
            let mut w = ctx.writer();
            w.kw("INSERT INTO").raw(&qualified_table(ctx, table)).lparen();
            w.ident_list(&columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>());
            w.rparen().kw("VALUES");

            let tuples: Vec<String> = chunk
                .rows
                .iter()
                .map(|row| {
                    let values: Vec<String> = columns
                        .iter()
                        .filter_map(|c| value_expr(ctx, table, c, row, DmlPhase::Insert))
                        .collect();
                    format!("({})", values.join(", "))
                })
                .collect();
            w.raw(&tuples.join(", "));

            out.push(Statement::new(self.kind(), w.finish()).with_target(chunk));
        }
        Ok(out)
    }
}

/// Builds one UPDATE ... WHERE <pk> statement per row.
pub struct UpdateRowByPkBuilder;

impl StatementBuilder for UpdateRowByPkBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::UpdateRowByPk
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let rows = expect_rows(self.kind(), object)?;
        let table = &rows.table;
        let keys = key_columns(ctx, table);
        if keys.is_empty() {
            debug!(table = %table.name, "no key columns, skipping keyed update");
            return Ok(Vec::new());
        }
        let policy = &ctx.options.table;
        let key_names: Vec<&str> = keys.iter().map(|c| c.name.as_str()).collect();

        let mut out = Vec::new();
        for row in &rows.rows {
            let assignments: Vec<String> = table
                .columns
                .iter()
                .filter(|c| !key_names.contains(&c.name.as_str()))
                .filter(|c| (policy.updatable)(table, c))
                .filter_map(|c| {
                    value_expr(ctx, table, c, row, DmlPhase::Update).map(|expr| {
                        format!("{} = {expr}", ctx.dialect.quote(&ctx.options, &c.name))
                    })
                })
                .collect();
            if assignments.is_empty() {
                continue;
            }
            let mut w = ctx.writer();
            w.kw("UPDATE").raw(&qualified_table(ctx, table));
            w.kw("SET").raw(&assignments.join(", "));
            w.kw("WHERE").raw(&key_predicates(ctx, &keys, row));
            out.push(
                Statement::new(self.kind(), w.finish()).with_target(RowSet {
                    table: table.clone(),
                    rows: vec![row.clone()],
                }),
            );
        }
        Ok(out)
    }
}

/// Builds one DELETE ... WHERE <pk> statement per row.
pub struct DeleteRowByPkBuilder;

impl StatementBuilder for DeleteRowByPkBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::DeleteRowByPk
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let rows = expect_rows(self.kind(), object)?;
        let table = &rows.table;
        let keys = key_columns(ctx, table);
        if keys.is_empty() {
            debug!(table = %table.name, "no key columns, skipping keyed delete");
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for row in &rows.rows {
            let mut w = ctx.writer();
            w.kw("DELETE FROM").raw(&qualified_table(ctx, table));
            w.kw("WHERE").raw(&key_predicates(ctx, &keys, row));
            out.push(
                Statement::new(self.kind(), w.finish()).with_original(RowSet {
                    table: table.clone(),
                    rows: vec![row.clone()],
                }),
            );
        }
        Ok(out)
    }
}

/// Builds INSERT ... SELECT ... WHERE NOT EXISTS per row: the
/// insert half of the composite MERGE.
pub struct InsertSelectRowBuilder;

impl StatementBuilder for InsertSelectRowBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::InsertSelectRow
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let rows = expect_rows(self.kind(), object)?;
        let table = &rows.table;
        let keys = key_columns(ctx, table);
        if keys.is_empty() {
            debug!(table = %table.name, "no key columns, skipping insert-select");
            return Ok(Vec::new());
        }
        let columns = insert_columns(ctx, table);
        let name = qualified_table(ctx, table);

        let mut out = Vec::new();
        for row in &rows.rows {
            let values: Vec<String> = columns
                .iter()
                .filter_map(|c| value_expr(ctx, table, c, row, DmlPhase::Insert))
                .collect();
            let mut w = ctx.writer();
            w.kw("INSERT INTO").raw(&name).lparen();
            w.ident_list(&columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>());
            w.rparen().kw("SELECT").raw(&values.join(", "));
            w.kw("WHERE NOT EXISTS").lparen();
            w.kw("SELECT 1 FROM").raw(&name);
            w.kw("WHERE").raw(&key_predicates(ctx, &keys, row));
            w.rparen();
            out.push(
                Statement::new(self.kind(), w.finish()).with_target(RowSet {
                    table: table.clone(),
                    rows: vec![row.clone()],
                }),
            );
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::model::{Constraint, DataType, Value};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    fn audited_table() -> Table {
        Table::new("events")
            .column(Column::new("id", DataType::Bigint).identity())
            .column(Column::new("payload", DataType::Text).not_null())
            .column(Column::new("created_at", DataType::Timestamp).not_null())
            .column(Column::new("updated_at", DataType::Timestamp).not_null())
            .column(Column::new("lock_version", DataType::Integer).not_null())
            .constraint(Constraint::primary_key("pk_events", &["id"]))
    }

    fn row(id: i64, payload: &str) -> Row {
        Row::new().set("id", id).set("payload", payload)
    }

    #[test]
    fn insert_fills_audit_and_lock_columns() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let rows = RowSet::new(audited_table()).row(row(1, "hello"));
        let stmts = ctx
            .build(StatementKind::InsertRow, &SchemaObject::Rows(rows))
            .expect("insert");
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].text(),
            "INSERT INTO events (id, payload, created_at, updated_at, lock_version) \
             VALUES (DEFAULT, 'hello', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP, 0)"
        );
    }

    #[test]
    fn inserts_are_chunked_by_batch_size() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new().dml_batch_size(2));

        let rows = RowSet::new(audited_table())
            .row(row(1, "a"))
            .row(row(2, "b"))
            .row(row(3, "c"));
        let stmts = ctx
            .build(StatementKind::InsertRow, &SchemaObject::Rows(rows))
            .expect("insert");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].text().matches("('").count(), 0); // sanity: tuples use full literals
        assert_eq!(stmts[0].text().matches("CURRENT_TIMESTAMP").count(), 4);
        assert!(stmts[1].text().contains("'c'"));
    }

    #[test]
    fn update_increments_lock_and_refreshes_updated_at() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let rows = RowSet::new(audited_table()).row(row(7, "new"));
        let stmts = ctx
            .build(StatementKind::UpdateRowByPk, &SchemaObject::Rows(rows))
            .expect("update");
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].text(),
            "UPDATE events SET payload = 'new', updated_at = CURRENT_TIMESTAMP, \
             lock_version = lock_version + 1 WHERE id = 7"
        );
    }

    #[test]
    fn delete_by_pk() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let rows = RowSet::new(audited_table()).row(row(7, "x"));
        let stmts = ctx
            .build(StatementKind::DeleteRowByPk, &SchemaObject::Rows(rows))
            .expect("delete");
        assert_eq!(stmts[0].text(), "DELETE FROM events WHERE id = 7");
    }

    #[test]
    fn coalesce_wraps_nullable_numerics_when_requested() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let mut options = Options::new();
        options.table.coalesce_on_insert = true;
        let ctx = GenContext::new(&registry, &dialect, options);

        let table = Table::new("scores")
            .column(Column::new("player", DataType::Text).not_null())
            .column(Column::new("points", DataType::Integer));
        let rows = RowSet::new(table).row(
            Row::new()
                .set("player", "ada")
                .set("points", Value::Null),
        );
        let stmts = ctx
            .build(StatementKind::InsertRow, &SchemaObject::Rows(rows))
            .expect("insert");
        assert!(stmts[0].text().contains("COALESCE(NULL, 0)"));
    }

    #[test]
    fn merge_row_is_insert_select_then_update() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let rows = SchemaObject::Rows(RowSet::new(audited_table()).row(row(1, "m")));
        let merged = ctx.build(StatementKind::MergeRow, &rows).expect("merge");

        let mut expected = ctx.build(StatementKind::InsertSelectRow, &rows).expect("is");
        expected.extend(ctx.build(StatementKind::UpdateRowByPk, &rows).expect("up"));

        let merged_texts: Vec<&str> = merged.iter().map(Statement::text).collect();
        let expected_texts: Vec<&str> = expected.iter().map(Statement::text).collect();
        assert_eq!(merged_texts, expected_texts);
        assert!(merged_texts[0].contains("WHERE NOT EXISTS"));
        assert!(merged_texts[1].starts_with("UPDATE events SET"));
    }
}
