//! The ALTER TABLE sequencer.
//!
//! Converts a table difference node into an ordered statement list a
//! live database will accept: rename first, then constraint and
//! index drops (so nothing still references a column about to
//! change), then column changes in ordinal order, then constraint
//! and index (re)creation against the new column set, then the
//! dialect's partitioning and trailing hooks.

use tracing::debug;

use crate::diff::{by_state, label, ChangeState, Diff, DiffNode, TableDiff};
use crate::error::{GenerateError, Result};
use crate::kind::StatementKind;
use crate::model::{Column, ObjectKind, SchemaObject, Table};
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_table, StatementBuilder};

/// Builds the ALTER sequence for a table difference.
pub struct AlterTableBuilder;

impl AlterTableBuilder {
    fn column_statements(
        ctx: &GenContext<'_>,
        table: &Table,
        diff: &TableDiff,
    ) -> Result<Vec<Statement>> {
        let dialect = ctx.dialect;
        let mut out = Vec::new();

        // Drops first.
        for d in by_state(&diff.columns, ChangeState::Deleted) {
            let column = d.original().ok_or_else(|| malformed("deleted column"))?;
            out.push(
                Statement::new(
                    StatementKind::Alter,
                    dialect.drop_column_sql(&ctx.options, table, column),
                )
                .with_original(table.clone()),
            );
        }

        // Added and modified columns, ascending by target ordinal.
        let mut pending: Vec<&Diff<Column>> = diff
            .columns
            .iter()
            .filter(|d| d.state() != ChangeState::Deleted)
            .collect();
        pending.sort_by_key(|d| d.present().ordinal);

        for d in pending {
            match d.state() {
                ChangeState::Added => {
                    let column = d.target().ok_or_else(|| malformed("added column"))?;
                    out.push(
                        Statement::new(
                            StatementKind::Alter,
                            dialect.add_column_sql(&ctx.options, table, column),
                        )
                        .with_target(table.clone()),
                    );
                }
                ChangeState::Modified => {
                    let original = d.original().ok_or_else(|| malformed("modified column"))?;
                    let target = d.target().ok_or_else(|| malformed("modified column"))?;
                    // A definition change and a rename are never
                    // merged: alter first, under the pre-rename
                    // name, then rename.
                    if d.definition_changed() {
                        for sql in
                            dialect.alter_column_sql(&ctx.options, table, original, target, d.changed())
                        {
                            out.push(
                                Statement::new(StatementKind::Alter, sql)
                                    .with_original(table.clone())
                                    .with_target(table.clone()),
                            );
                        }
                    }
                    if d.name_changed() && original.name != target.name {
                        out.push(
                            Statement::new(
                                StatementKind::Alter,
                                dialect.rename_column_sql(
                                    &ctx.options,
                                    table,
                                    &original.name,
                                    &target.name,
                                ),
                            )
                            .with_original(table.clone())
                            .with_target(table.clone()),
                        );
                    }
                }
                ChangeState::Deleted => {}
            }
        }
        Ok(out)
    }

    fn detail_drops<T>(
        ctx: &GenContext<'_>,
        object_kind: ObjectKind,
        diffs: &[Diff<T>],
        wrap: impl Fn(T) -> SchemaObject,
    ) -> Result<Vec<Statement>>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        for d in by_state(diffs, ChangeState::Deleted) {
            let original = d.original().ok_or_else(|| malformed("deleted detail"))?;
            let builder = ctx.registry.resolve(object_kind, StatementKind::Drop);
            out.extend(builder.build(ctx, &wrap(original.clone()))?);
        }
        Ok(out)
    }

    /// Added details are created; modified ones are dropped and
    /// recreated — a detail modification is never an in-place alter.
    fn detail_creates<T>(
        ctx: &GenContext<'_>,
        object_kind: ObjectKind,
        diffs: &[Diff<T>],
        wrap: impl Fn(T) -> SchemaObject,
    ) -> Result<Vec<Statement>>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        for d in by_state(diffs, ChangeState::Added) {
            let target = d.target().ok_or_else(|| malformed("added detail"))?;
            let builder = ctx.registry.resolve(object_kind, StatementKind::Create);
            out.extend(builder.build(ctx, &wrap(target.clone()))?);
        }
        for d in by_state(diffs, ChangeState::Modified) {
            let original = d.original().ok_or_else(|| malformed("modified detail"))?;
            let target = d.target().ok_or_else(|| malformed("modified detail"))?;
            let drop = ctx.registry.resolve(object_kind, StatementKind::Drop);
            out.extend(drop.build(ctx, &wrap(original.clone()))?);
            let create = ctx.registry.resolve(object_kind, StatementKind::Create);
            out.extend(create.build(ctx, &wrap(target.clone()))?);
        }
        Ok(out)
    }
}

impl StatementBuilder for AlterTableBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Alter
    }

    /// With no difference to work from, a whole object yields
    /// nothing to alter.
    fn build(&self, _ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        expect_table(self.kind(), object)?;
        Ok(Vec::new())
    }

    #[allow(clippy::too_many_lines)]
    fn build_diff(&self, ctx: &GenContext<'_>, node: &DiffNode) -> Result<Vec<Statement>> {
        let DiffNode::Table(diff) = node else {
            return Err(GenerateError::UnsupportedObject {
                kind: self.kind(),
                expected: ObjectKind::Table,
                actual: node.object_kind(),
            });
        };

        // Added/Deleted tables route to their whole-object builders.
        match diff.state() {
            ChangeState::Added => {
                let target = diff.target().ok_or_else(|| malformed("added table"))?;
                return ctx.build(StatementKind::Create, &SchemaObject::Table(target.clone()));
            }
            ChangeState::Deleted => {
                let original = diff.original().ok_or_else(|| malformed("deleted table"))?;
                return ctx.build(StatementKind::Drop, &SchemaObject::Table(original.clone()));
            }
            ChangeState::Modified => {}
        }

        let original = diff.original().ok_or_else(|| malformed("modified table"))?;
        let target = diff.target().ok_or_else(|| malformed("modified table"))?;
        debug!(table = %original.name, "sequencing table alteration");

        let mut out = Vec::new();

        // 1. Rename first, so every later statement can use the new
        //    name.
        if diff.name_changed() && original.name != target.name {
            out.push(
                Statement::new(
                    StatementKind::Alter,
                    ctx.dialect
                        .rename_table_sql(&ctx.options, original, &target.name),
                )
                .with_original(original.clone())
                .with_target(target.clone()),
            );
        }

        // 2./3. Drop deleted constraints, then deleted indexes,
        //    before any column change: a constraint or index must
        //    not still reference a column about to be dropped,
        //    renamed or re-typed.
        out.extend(Self::detail_drops(
            ctx,
            ObjectKind::Constraint,
            &diff.constraints,
            SchemaObject::Constraint,
        )?);
        out.extend(Self::detail_drops(
            ctx,
            ObjectKind::Index,
            &diff.indexes,
            SchemaObject::Index,
        )?);

        // 4. Column changes against the (possibly renamed) table.
        out.extend(Self::column_statements(ctx, target, diff)?);

        // 5./6. Recreate constraints, then indexes, so they reflect
        //    the new column set.
        out.extend(Self::detail_creates(
            ctx,
            ObjectKind::Constraint,
            &diff.constraints,
            SchemaObject::Constraint,
        )?);
        out.extend(Self::detail_creates(
            ctx,
            ObjectKind::Index,
            &diff.indexes,
            SchemaObject::Index,
        )?);

        // 7. Partitioning hook.
        if diff.changed().contains(label::PARTITIONING) {
            out.extend(ctx.dialect.alter_partitioning_sql(&ctx.options, diff));
        }

        // 8. Dialect trailing definitions.
        out.extend(ctx.dialect.table_alter_extras(&ctx.options, diff));

        Ok(out)
    }
}

fn malformed(what: &str) -> GenerateError {
    GenerateError::MalformedDiff(format!("{what} missing its required side"))
}
