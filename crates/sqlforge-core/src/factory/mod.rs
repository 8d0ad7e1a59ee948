//! Statement builders.
//!
//! One builder per (object kind, statement kind) pair, resolved
//! through the [`BuilderRegistry`](crate::registry::BuilderRegistry).
//! Builders are stateless: each call receives the full context and
//! produces statements, nothing else — no I/O, no execution.

mod acl;
mod alter_table;
mod catalog;
mod constraint;
mod index;
mod routine;
mod row;
mod schema;
mod sequence;
mod table;
mod trigger;
mod view;

pub use acl::{
    CreateRoleBuilder, CreateTablespaceBuilder, DropRoleBuilder, DropTablespaceBuilder,
    GrantBuilder, RevokeBuilder,
};
pub use alter_table::AlterTableBuilder;
pub use catalog::{AlterCatalogBuilder, CreateCatalogBuilder, CATALOG_CREATE_ORDER};
pub use constraint::{CreateConstraintBuilder, DropConstraintBuilder};
pub use index::{CreateIndexBuilder, DropIndexBuilder};
pub use routine::{
    CreateDomainBuilder, CreateFunctionBuilder, CreateProcedureBuilder, DropDomainBuilder,
    DropFunctionBuilder, DropProcedureBuilder,
};
pub use row::{
    DeleteRowByPkBuilder, InsertRowBuilder, InsertSelectRowBuilder, UpdateRowByPkBuilder,
};
pub use schema::{AlterSchemaBuilder, CreateSchemaBuilder, DropSchemaBuilder, SCHEMA_CREATE_ORDER};
pub use sequence::{AlterSequenceBuilder, CreateSequenceBuilder, DropSequenceBuilder};
pub use table::{CreateTableBuilder, DropTableBuilder, LockTableBuilder, TruncateTableBuilder};
pub use trigger::{CreateTriggerBuilder, DropTriggerBuilder};
pub use view::{CreateViewBuilder, DropViewBuilder};

use tracing::trace;

use crate::diff::{ChangeState, DiffNode};
use crate::error::{GenerateError, Result};
use crate::kind::{sort_tables, StatementKind};
use crate::model::{ObjectKind, SchemaObject, Table};
use crate::registry::GenContext;
use crate::stmt::Statement;

/// A generator turning schema objects (or difference nodes) into
/// ordered statement lists.
pub trait StatementBuilder: Send + Sync {
    /// The statement kind this builder produces.
    fn kind(&self) -> StatementKind;

    /// Builds statements for one whole object.
    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>>;

    /// Builds statements for a homogeneous batch, sorting tables
    /// (and row sets) into the order the statement kind requires.
    fn build_batch(&self, ctx: &GenContext<'_>, objects: &[SchemaObject]) -> Result<Vec<Statement>> {
        let sorted = sort_batch(self.kind(), objects);
        let mut out = Vec::new();
        for object in &sorted {
            out.extend(self.build(ctx, object)?);
        }
        Ok(out)
    }

    /// Builds statements for one difference node. The default
    /// re-derives the affected side of the object (the original for
    /// deleting kinds, the target otherwise) and builds it whole.
    fn build_diff(&self, ctx: &GenContext<'_>, node: &DiffNode) -> Result<Vec<Statement>> {
        let Some(object) = node.object_for(self.kind().change_state()) else {
            return Err(GenerateError::MalformedDiff(String::from(
                "difference node with no object on either side",
            )));
        };
        self.build(ctx, &object)
    }

    /// Builds statements for a batch of difference nodes: all
    /// Deleted first, then Added, then Modified.
    fn build_diff_batch(&self, ctx: &GenContext<'_>, nodes: &[DiffNode]) -> Result<Vec<Statement>> {
        build_diff_batch(ctx, nodes)
    }
}

/// Batches difference nodes by change state — Deleted, then Added,
/// then Modified — resolving each node's builder through the
/// registry. Table sub-batches are sorted into drop order
/// (deletions) or dependency order (additions).
pub fn build_diff_batch(ctx: &GenContext<'_>, nodes: &[DiffNode]) -> Result<Vec<Statement>> {
    let mut out = Vec::new();
    for state in [ChangeState::Deleted, ChangeState::Added, ChangeState::Modified] {
        let subset: Vec<&DiffNode> = nodes.iter().filter(|n| n.state() == state).collect();
        for node in sort_diff_subset(state, subset) {
            trace!(kind = ?node.object_kind(), ?state, "diff node");
            out.extend(ctx.build_diff(node)?);
        }
    }
    Ok(out)
}

/// Sorts a same-state subset of diff nodes. Only table nodes carry
/// ordering constraints (foreign-key dependencies).
fn sort_diff_subset(state: ChangeState, mut subset: Vec<&DiffNode>) -> Vec<&DiffNode> {
    let all_tables = subset.iter().all(|n| n.object_kind() == ObjectKind::Table);
    if !all_tables || subset.len() < 2 {
        return subset;
    }
    let order = match state {
        ChangeState::Deleted => crate::kind::TableOrder::Drop,
        _ => crate::kind::TableOrder::Create,
    };
    let mut tables: Vec<Table> = subset
        .iter()
        .filter_map(|n| match n.object_for(Some(state)) {
            Some(SchemaObject::Table(t)) => Some(t),
            _ => None,
        })
        .collect();
    if tables.len() != subset.len() {
        return subset;
    }
    sort_tables(&mut tables, order);
    let position = |node: &&DiffNode| {
        node.object_for(Some(state)).map_or(usize::MAX, |o| {
            tables
                .iter()
                .position(|t| t.name == o.name())
                .unwrap_or(usize::MAX)
        })
    };
    subset.sort_by_key(position);
    subset
}

/// Sorts a whole-object batch into the order the statement kind
/// requires. Tables and row sets are ordered by foreign-key
/// dependency; other batches keep their given order.
fn sort_batch(kind: StatementKind, objects: &[SchemaObject]) -> Vec<SchemaObject> {
    let Some(order) = kind.table_order() else {
        return objects.to_vec();
    };
    let batch_table = |o: &SchemaObject| match o {
        SchemaObject::Table(t) => Some(t.clone()),
        SchemaObject::Rows(r) => Some(r.table.clone()),
        _ => None,
    };
    let mut tables: Vec<Table> = objects.iter().filter_map(batch_table).collect();
    if tables.len() != objects.len() {
        return objects.to_vec();
    }
    sort_tables(&mut tables, order);
    let mut sorted = objects.to_vec();
    sorted.sort_by_key(|o| {
        batch_table(o).map_or(usize::MAX, |t| {
            tables.iter().position(|s| s.name == t.name).unwrap_or(usize::MAX)
        })
    });
    sorted
}

/// A builder that produces nothing. The resolution fallback for
/// unsupported (object kind, statement kind) pairs.
pub struct NoopBuilder {
    kind: StatementKind,
}

impl NoopBuilder {
    /// Creates a no-op builder for a statement kind.
    #[must_use]
    pub const fn new(kind: StatementKind) -> Self {
        Self { kind }
    }
}

impl StatementBuilder for NoopBuilder {
    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn build(&self, _ctx: &GenContext<'_>, _object: &SchemaObject) -> Result<Vec<Statement>> {
        Ok(Vec::new())
    }

    fn build_diff(&self, _ctx: &GenContext<'_>, _node: &DiffNode) -> Result<Vec<Statement>> {
        Ok(Vec::new())
    }
}

/// A builder running several statement kinds' builders in order and
/// concatenating their output. Used for surrogate decomposition
/// (ALTER → DROP + CREATE, MERGE → INSERT-SELECT + UPDATE) and for
/// change states mapped to several kinds.
pub struct CompositeBuilder {
    object: ObjectKind,
    kind: StatementKind,
    kinds: Vec<StatementKind>,
}

impl CompositeBuilder {
    /// Creates a composite over the given kinds.
    #[must_use]
    pub const fn new(object: ObjectKind, kind: StatementKind, kinds: Vec<StatementKind>) -> Self {
        Self {
            object,
            kind,
            kinds,
        }
    }
}

impl StatementBuilder for CompositeBuilder {
    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let mut out = Vec::new();
        for &kind in &self.kinds {
            let builder = ctx.registry.resolve(self.object, kind);
            out.extend(builder.build(ctx, object)?);
        }
        Ok(out)
    }

    fn build_diff(&self, ctx: &GenContext<'_>, node: &DiffNode) -> Result<Vec<Statement>> {
        let mut out = Vec::new();
        for &kind in &self.kinds {
            let builder = ctx.registry.resolve(self.object, kind);
            out.extend(builder.build_diff(ctx, node)?);
        }
        Ok(out)
    }
}

// ---- shared helpers ------------------------------------------------

/// Renders a table's (optionally schema-qualified) name.
pub(crate) fn qualified_table(ctx: &GenContext<'_>, table: &Table) -> String {
    let mut w = ctx.writer();
    let schema = table
        .schema
        .as_deref()
        .filter(|_| ctx.options.decorate_schema_name);
    w.qualified(schema, &table.name);
    w.finish()
}

pub(crate) fn expect_table<'o>(
    kind: StatementKind,
    object: &'o SchemaObject,
) -> Result<&'o Table> {
    match object {
        SchemaObject::Table(t) => Ok(t),
        other => Err(GenerateError::UnsupportedObject {
            kind,
            expected: ObjectKind::Table,
            actual: other.kind(),
        }),
    }
}

macro_rules! expect_variant {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub(crate) fn $fn_name<'o>(
            kind: StatementKind,
            object: &'o SchemaObject,
        ) -> Result<&'o $ty> {
            match object {
                SchemaObject::$variant(v) => Ok(v),
                other => Err(GenerateError::UnsupportedObject {
                    kind,
                    expected: ObjectKind::$variant,
                    actual: other.kind(),
                }),
            }
        }
    };
}

expect_variant!(expect_constraint, Constraint, crate::model::Constraint);
expect_variant!(expect_index, Index, crate::model::Index);
expect_variant!(expect_sequence, Sequence, crate::model::Sequence);
expect_variant!(expect_domain, Domain, crate::model::Domain);
expect_variant!(expect_function, Function, crate::model::Function);
expect_variant!(expect_procedure, Procedure, crate::model::Procedure);
expect_variant!(expect_view, View, crate::model::View);
expect_variant!(expect_trigger, Trigger, crate::model::Trigger);
expect_variant!(expect_tablespace, Tablespace, crate::model::Tablespace);
expect_variant!(expect_role, Role, crate::model::Role);
expect_variant!(expect_privilege, Privilege, crate::model::Privilege);
expect_variant!(expect_rows, Rows, crate::model::RowSet);
expect_variant!(expect_schema, Schema, crate::model::Schema);
expect_variant!(expect_catalog, Catalog, crate::model::Catalog);
