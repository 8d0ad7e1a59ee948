//! Schema builders: category-ordered create/drop and the schema
//! alter sequencer.

use tracing::debug;

use crate::diff::{ChangeState, DiffNode, SchemaDiff};
use crate::error::{GenerateError, Result};
use crate::kind::StatementKind;
use crate::model::{ObjectKind, Schema, SchemaObject};
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{build_diff_batch, expect_schema, StatementBuilder};

/// The fixed creation order of schema object categories. Dependency
/// respecting: sequences and types exist before the tables that use
/// them, tables before the views that read them, views before the
/// triggers that fire around them. Drops walk this list in reverse.
pub const SCHEMA_CREATE_ORDER: &[ObjectKind] = &[
    ObjectKind::Sequence,
    ObjectKind::Domain,
    ObjectKind::Function,
    ObjectKind::Procedure,
    ObjectKind::Table,
    ObjectKind::View,
    ObjectKind::Trigger,
];

/// The members of one category, wrapped for dispatch.
fn members(schema: &Schema, category: ObjectKind) -> Vec<SchemaObject> {
    match category {
        ObjectKind::Sequence => schema.sequences.iter().cloned().map(Into::into).collect(),
        ObjectKind::Domain => schema.domains.iter().cloned().map(Into::into).collect(),
        ObjectKind::Function => schema.functions.iter().cloned().map(Into::into).collect(),
        ObjectKind::Procedure => schema.procedures.iter().cloned().map(Into::into).collect(),
        ObjectKind::Table => schema.tables.iter().cloned().map(Into::into).collect(),
        ObjectKind::View => schema.views.iter().cloned().map(Into::into).collect(),
        ObjectKind::Trigger => schema.triggers.iter().cloned().map(Into::into).collect(),
        _ => Vec::new(),
    }
}

/// The per-category diff nodes of a schema diff.
fn diff_members(diff: &SchemaDiff, category: ObjectKind) -> Vec<DiffNode> {
    match category {
        ObjectKind::Sequence => diff.sequences.iter().cloned().map(DiffNode::Sequence).collect(),
        ObjectKind::Domain => diff.domains.iter().cloned().map(DiffNode::Domain).collect(),
        ObjectKind::Function => diff.functions.iter().cloned().map(DiffNode::Function).collect(),
        ObjectKind::Procedure => diff.procedures.iter().cloned().map(DiffNode::Procedure).collect(),
        ObjectKind::Table => diff.tables.iter().cloned().map(DiffNode::Table).collect(),
        ObjectKind::View => diff.views.iter().cloned().map(DiffNode::View).collect(),
        ObjectKind::Trigger => diff.triggers.iter().cloned().map(DiffNode::Trigger).collect(),
        _ => Vec::new(),
    }
}

/// Builds CREATE SCHEMA followed by every member category in
/// creation order.
pub struct CreateSchemaBuilder;

impl StatementBuilder for CreateSchemaBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let schema = expect_schema(self.kind(), object)?;
        debug!(schema = %schema.name, "sequencing schema creation");

        let mut w = ctx.writer();
        w.kw("CREATE SCHEMA");
        if ctx.options.create_if_not_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF NOT EXISTS");
        }
        w.ident(&schema.name);
        let mut out = vec![Statement::new(self.kind(), w.finish()).with_target(schema.clone())];

        for &category in SCHEMA_CREATE_ORDER {
            let batch = members(schema, category);
            if batch.is_empty() {
                continue;
            }
            let builder = ctx.registry.resolve(category, StatementKind::Create);
            out.extend(builder.build_batch(ctx, &batch)?);
        }
        Ok(out)
    }
}

/// Builds member drops in reverse creation order, then DROP SCHEMA.
pub struct DropSchemaBuilder;

impl StatementBuilder for DropSchemaBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let schema = expect_schema(self.kind(), object)?;
        let mut out = Vec::new();
        for &category in SCHEMA_CREATE_ORDER.iter().rev() {
            let batch = members(schema, category);
            if batch.is_empty() {
                continue;
            }
            let builder = ctx.registry.resolve(category, StatementKind::Drop);
            out.extend(builder.build_batch(ctx, &batch)?);
        }
        let mut w = ctx.writer();
        w.kw("DROP SCHEMA");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&schema.name);
        out.push(Statement::new(self.kind(), w.finish()).with_original(schema.clone()));
        Ok(out)
    }
}

/// The schema alter sequencer: schema-level property changes first,
/// then every member category in creation order, each batched
/// Deleted-then-Added-then-Modified. A SET search_path statement is
/// prepended when member changes exist, the dialect supports it and
/// the policy asks for it.
pub struct AlterSchemaBuilder;

impl StatementBuilder for AlterSchemaBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Alter
    }

    fn build(&self, _ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        expect_schema(self.kind(), object)?;
        Ok(Vec::new())
    }

    fn build_diff(&self, ctx: &GenContext<'_>, node: &DiffNode) -> Result<Vec<Statement>> {
        let DiffNode::Schema(diff) = node else {
            return Err(GenerateError::UnsupportedObject {
                kind: self.kind(),
                expected: ObjectKind::Schema,
                actual: node.object_kind(),
            });
        };

        match diff.state() {
            ChangeState::Added => {
                let target = diff
                    .target()
                    .ok_or_else(|| GenerateError::MalformedDiff(String::from("added schema")))?;
                return ctx.build(StatementKind::Create, &SchemaObject::Schema(target.clone()));
            }
            ChangeState::Deleted => {
                let original = diff
                    .original()
                    .ok_or_else(|| GenerateError::MalformedDiff(String::from("deleted schema")))?;
                return ctx.build(StatementKind::Drop, &SchemaObject::Schema(original.clone()));
            }
            ChangeState::Modified => {}
        }

        let schema = diff.present();
        debug!(schema = %schema.name, "sequencing schema alteration");
        let mut out = Vec::new();

        if diff.has_member_changes()
            && ctx.options.set_search_path
            && ctx.dialect.supports_set_search_path()
        {
            if let Some(sql) = ctx.dialect.search_path_sql(&ctx.options, &schema.name) {
                out.push(Statement::new(StatementKind::SetSearchPath, sql));
            }
        }

        for sql in ctx.dialect.alter_schema_property_sql(&ctx.options, diff) {
            out.push(Statement::new(StatementKind::Alter, sql).with_target(schema.clone()));
        }

        for &category in SCHEMA_CREATE_ORDER {
            let nodes = diff_members(diff, category);
            if nodes.is_empty() {
                continue;
            }
            out.extend(build_diff_batch(ctx, &nodes)?);
        }
        Ok(out)
    }
}
