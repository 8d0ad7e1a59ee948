//! Builder resolution.
//!
//! A [`BuilderRegistry`] maps (object kind, statement kind) pairs to
//! builder constructors and (object kind, change state) pairs to
//! statement kind lists. It is a plain value, not a process-wide
//! singleton: share one behind an `Arc` for concurrent read-only
//! resolution, or keep `&mut` access to reconfigure it. Every
//! `resolve` constructs a fresh builder, so builders never carry
//! state across generation calls.
//!
//! Resolution never fails: a missing binding for a composite kind
//! decomposes into its surrogates; anything else degrades to a
//! no-op builder that produces an empty statement list.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::diff::{ChangeState, DiffNode};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::factory::{
    AlterCatalogBuilder, AlterSchemaBuilder, AlterSequenceBuilder, AlterTableBuilder,
    CompositeBuilder, CreateCatalogBuilder, CreateConstraintBuilder, CreateDomainBuilder,
    CreateFunctionBuilder, CreateIndexBuilder, CreateProcedureBuilder, CreateRoleBuilder,
    CreateSchemaBuilder, CreateSequenceBuilder, CreateTableBuilder, CreateTablespaceBuilder,
    CreateTriggerBuilder, CreateViewBuilder, DeleteRowByPkBuilder, DropConstraintBuilder,
    DropDomainBuilder, DropFunctionBuilder, DropIndexBuilder, DropProcedureBuilder,
    DropRoleBuilder, DropSchemaBuilder, DropSequenceBuilder, DropTableBuilder,
    DropTablespaceBuilder, DropTriggerBuilder, DropViewBuilder, GrantBuilder,
    InsertRowBuilder, InsertSelectRowBuilder, LockTableBuilder, NoopBuilder, RevokeBuilder,
    StatementBuilder, TruncateTableBuilder, UpdateRowByPkBuilder,
};
use crate::kind::StatementKind;
use crate::model::{ObjectKind, SchemaObject};
use crate::options::Options;
use crate::stmt::Statement;
use crate::writer::SqlWriter;

/// A builder constructor stored in the registry.
pub type BuilderCtor = Arc<dyn Fn() -> Box<dyn StatementBuilder> + Send + Sync>;

/// Everything a builder needs during one generation call: the
/// registry (for nested resolution), the dialect, and the policy.
pub struct GenContext<'a> {
    /// The registry builders resolve collaborators through.
    pub registry: &'a BuilderRegistry,
    /// The active dialect.
    pub dialect: &'a dyn Dialect,
    /// The generation policy.
    pub options: Options,
}

impl<'a> GenContext<'a> {
    /// Creates a context.
    #[must_use]
    pub fn new(registry: &'a BuilderRegistry, dialect: &'a dyn Dialect, options: Options) -> Self {
        Self {
            registry,
            dialect,
            options,
        }
    }

    /// A writer configured for the active dialect and policy.
    #[must_use]
    pub fn writer(&self) -> SqlWriter {
        self.dialect.writer(&self.options)
    }

    /// Resolves and runs the builder for one object.
    pub fn build(&self, kind: StatementKind, object: &SchemaObject) -> Result<Vec<Statement>> {
        self.registry.resolve(object.kind(), kind).build(self, object)
    }

    /// Resolves and runs the builder for a homogeneous batch.
    pub fn build_batch(
        &self,
        kind: StatementKind,
        objects: &[SchemaObject],
    ) -> Result<Vec<Statement>> {
        match objects.first() {
            Some(first) => self
                .registry
                .resolve(first.kind(), kind)
                .build_batch(self, objects),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves and runs the builder for one difference node.
    pub fn build_diff(&self, node: &DiffNode) -> Result<Vec<Statement>> {
        self.registry.resolve_diff(node).build_diff(self, node)
    }
}

/// Maps object/statement kinds to builders.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: HashMap<(ObjectKind, StatementKind), BuilderCtor>,
    state_kinds: HashMap<(ObjectKind, ChangeState), Vec<StatementKind>>,
}

impl BuilderRegistry {
    /// An empty registry. Everything resolves to no-ops.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default bindings: one builder per supported
    /// (object kind, statement kind) pair, plus the change-state
    /// mappings (Added→CREATE and friends, with drop-then-create for
    /// modified constraints, indexes, views, triggers and routines).
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn with_defaults() -> Self {
        use ObjectKind as O;
        use StatementKind as K;

        let mut r = Self::new();

        r.register(O::Table, K::Create, || Box::new(CreateTableBuilder));
        r.register(O::Table, K::Drop, || Box::new(DropTableBuilder));
        r.register(O::Table, K::Alter, || Box::new(AlterTableBuilder));
        r.register(O::Table, K::Truncate, || Box::new(TruncateTableBuilder));
        r.register(O::Table, K::Lock, || Box::new(LockTableBuilder));

        r.register(O::Constraint, K::Create, || Box::new(CreateConstraintBuilder));
        r.register(O::Constraint, K::Drop, || Box::new(DropConstraintBuilder));
        r.register(O::Index, K::Create, || Box::new(CreateIndexBuilder));
        r.register(O::Index, K::Drop, || Box::new(DropIndexBuilder));

        r.register(O::Sequence, K::Create, || Box::new(CreateSequenceBuilder));
        r.register(O::Sequence, K::Drop, || Box::new(DropSequenceBuilder));
        r.register(O::Sequence, K::Alter, || Box::new(AlterSequenceBuilder));

        r.register(O::Domain, K::Create, || Box::new(CreateDomainBuilder));
        r.register(O::Domain, K::Drop, || Box::new(DropDomainBuilder));
        r.register(O::Function, K::Create, || Box::new(CreateFunctionBuilder));
        r.register(O::Function, K::Drop, || Box::new(DropFunctionBuilder));
        r.register(O::Procedure, K::Create, || Box::new(CreateProcedureBuilder));
        r.register(O::Procedure, K::Drop, || Box::new(DropProcedureBuilder));
        r.register(O::View, K::Create, || Box::new(CreateViewBuilder));
        r.register(O::View, K::Drop, || Box::new(DropViewBuilder));
        r.register(O::Trigger, K::Create, || Box::new(CreateTriggerBuilder));
        r.register(O::Trigger, K::Drop, || Box::new(DropTriggerBuilder));

        r.register(O::Tablespace, K::Create, || Box::new(CreateTablespaceBuilder));
        r.register(O::Tablespace, K::Drop, || Box::new(DropTablespaceBuilder));
        r.register(O::Role, K::Create, || Box::new(CreateRoleBuilder));
        r.register(O::Role, K::Drop, || Box::new(DropRoleBuilder));
        r.register(O::Privilege, K::Grant, || Box::new(GrantBuilder));
        r.register(O::Privilege, K::Revoke, || Box::new(RevokeBuilder));

        r.register(O::Schema, K::Create, || Box::new(CreateSchemaBuilder));
        r.register(O::Schema, K::Drop, || Box::new(DropSchemaBuilder));
        r.register(O::Schema, K::Alter, || Box::new(AlterSchemaBuilder));
        r.register(O::Catalog, K::Create, || Box::new(CreateCatalogBuilder));
        r.register(O::Catalog, K::Alter, || Box::new(AlterCatalogBuilder));

        r.register(O::Rows, K::InsertRow, || Box::new(InsertRowBuilder));
        r.register(O::Rows, K::InsertSelectRow, || Box::new(InsertSelectRowBuilder));
        r.register(O::Rows, K::UpdateRowByPk, || Box::new(UpdateRowByPkBuilder));
        r.register(O::Rows, K::DeleteRowByPk, || Box::new(DeleteRowByPkBuilder));
        // MergeRow stays unregistered: it resolves through its
        // surrogates (insert-select, then update-by-key).

        for object in [
            O::Constraint,
            O::Index,
            O::View,
            O::Trigger,
            O::Domain,
            O::Function,
            O::Procedure,
        ] {
            r.map_state(object, ChangeState::Modified, vec![K::Drop, K::Create]);
        }
        r.map_state(O::Privilege, ChangeState::Added, vec![K::Grant]);
        r.map_state(O::Privilege, ChangeState::Deleted, vec![K::Revoke]);
        r.map_state(O::Privilege, ChangeState::Modified, vec![K::Revoke, K::Grant]);
        r.map_state(O::Rows, ChangeState::Added, vec![K::InsertRow]);
        r.map_state(O::Rows, ChangeState::Modified, vec![K::UpdateRowByPk]);
        r.map_state(O::Rows, ChangeState::Deleted, vec![K::DeleteRowByPk]);

        r
    }

    /// Registers (or overwrites) a builder constructor.
    pub fn register<F>(&mut self, object: ObjectKind, kind: StatementKind, ctor: F)
    where
        F: Fn() -> Box<dyn StatementBuilder> + Send + Sync + 'static,
    {
        debug!(?object, ?kind, "register builder");
        self.builders.insert((object, kind), Arc::new(ctor));
    }

    /// Removes one binding. Removing a missing binding is a no-op.
    pub fn deregister(&mut self, object: ObjectKind, kind: StatementKind) {
        debug!(?object, ?kind, "deregister builder");
        self.builders.remove(&(object, kind));
    }

    /// Removes every binding for a statement kind.
    pub fn deregister_kind(&mut self, kind: StatementKind) {
        self.builders.retain(|(_, k), _| *k != kind);
    }

    /// Maps a change state to an ordered list of statement kinds for
    /// one object kind.
    pub fn map_state(&mut self, object: ObjectKind, state: ChangeState, kinds: Vec<StatementKind>) {
        self.state_kinds.insert((object, state), kinds);
    }

    /// Whether an exact binding exists.
    #[must_use]
    pub fn is_registered(&self, object: ObjectKind, kind: StatementKind) -> bool {
        self.builders.contains_key(&(object, kind))
    }

    /// Resolves the builder for an (object kind, statement kind)
    /// pair. Falls back to surrogate decomposition for composite
    /// kinds and to a silent no-op otherwise.
    #[must_use]
    pub fn resolve(&self, object: ObjectKind, kind: StatementKind) -> Box<dyn StatementBuilder> {
        if let Some(ctor) = self.builders.get(&(object, kind)) {
            return (**ctor)();
        }
        let surrogates = kind.surrogates();
        if !surrogates.is_empty() {
            debug!(?object, ?kind, ?surrogates, "composite resolution");
            return Box::new(CompositeBuilder::new(object, kind, surrogates.to_vec()));
        }
        debug!(?object, ?kind, "no builder registered, degrading to no-op");
        Box::new(NoopBuilder::new(kind))
    }

    /// Resolves the builder for a change state on an object kind,
    /// composing when the state maps to several statement kinds.
    #[must_use]
    pub fn resolve_for_state(
        &self,
        object: ObjectKind,
        state: ChangeState,
    ) -> Box<dyn StatementBuilder> {
        let kinds = self.state_kinds.get(&(object, state)).cloned().unwrap_or_else(|| {
            vec![match state {
                ChangeState::Added => StatementKind::Create,
                ChangeState::Modified => StatementKind::Alter,
                ChangeState::Deleted => StatementKind::Drop,
            }]
        });
        match kinds.as_slice() {
            [single] => self.resolve(object, *single),
            _ => {
                let primary = kinds.first().copied().unwrap_or(StatementKind::Alter);
                Box::new(CompositeBuilder::new(object, primary, kinds))
            }
        }
    }

    /// Resolves the builder for a difference node, using whichever
    /// side is present as the type witness.
    #[must_use]
    pub fn resolve_diff(&self, node: &DiffNode) -> Box<dyn StatementBuilder> {
        self.resolve_for_state(node.object_kind(), node.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::model::{Column, DataType, Table};

    fn table() -> SchemaObject {
        SchemaObject::Table(Table::new("t").column(Column::new("id", DataType::Bigint)))
    }

    #[test]
    fn exact_resolution_wins() {
        let registry = BuilderRegistry::with_defaults();
        let builder = registry.resolve(ObjectKind::Table, StatementKind::Create);
        assert_eq!(builder.kind(), StatementKind::Create);
    }

    #[test]
    fn unregistered_kind_degrades_to_noop() {
        let registry = BuilderRegistry::new();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());
        let stmts = ctx.build(StatementKind::Truncate, &table()).expect("noop");
        assert!(stmts.is_empty());
    }

    #[test]
    fn composite_kind_resolves_through_surrogates() {
        let registry = BuilderRegistry::with_defaults();
        // MergeRow has no binding; it must decompose rather than
        // degrade to a no-op.
        let builder = registry.resolve(ObjectKind::Rows, StatementKind::MergeRow);
        assert_eq!(builder.kind(), StatementKind::MergeRow);
    }

    #[test]
    fn deregistering_is_a_silent_noop_when_missing() {
        let mut registry = BuilderRegistry::new();
        registry.deregister(ObjectKind::Table, StatementKind::Create);
        assert!(!registry.is_registered(ObjectKind::Table, StatementKind::Create));
    }

    #[test]
    fn overriding_a_binding_overwrites() {
        let mut registry = BuilderRegistry::with_defaults();
        registry.register(ObjectKind::Table, StatementKind::Truncate, || {
            Box::new(NoopBuilder::new(StatementKind::Truncate))
        });
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());
        let stmts = ctx.build(StatementKind::Truncate, &table()).expect("noop override");
        assert!(stmts.is_empty());
    }
}
