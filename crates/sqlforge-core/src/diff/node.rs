//! Typed container diffs and the dispatchable node enum.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{
    Catalog, Column, Constraint, Domain, Function, Index, ObjectKind, Privilege, Procedure, Role,
    RowSet, Schema, SchemaObject, Sequence, Table, Tablespace, Trigger, View,
};

use super::{ChangeState, Diff};

/// A difference node over a table, carrying per-collection child
/// diffs for columns, constraints and indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDiff {
    state: ChangeState,
    original: Option<Table>,
    target: Option<Table>,
    changed: BTreeSet<String>,
    /// Column-level changes.
    pub columns: Vec<Diff<Column>>,
    /// Constraint-level changes.
    pub constraints: Vec<Diff<Constraint>>,
    /// Index-level changes.
    pub indexes: Vec<Diff<Index>>,
}

impl TableDiff {
    /// A node for a table present only in the target.
    #[must_use]
    pub fn added(target: Table) -> Self {
        Self {
            state: ChangeState::Added,
            original: None,
            target: Some(target),
            changed: BTreeSet::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// A node for a table present only in the original.
    #[must_use]
    pub fn deleted(original: Table) -> Self {
        Self {
            state: ChangeState::Deleted,
            original: Some(original),
            target: None,
            changed: BTreeSet::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// A node for a table present on both sides.
    #[must_use]
    pub fn modified(original: Table, target: Table) -> Self {
        Self {
            state: ChangeState::Modified,
            original: Some(original),
            target: Some(target),
            changed: BTreeSet::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Records a changed table-level property label.
    #[must_use]
    pub fn with_changed(mut self, property: impl Into<String>) -> Self {
        self.changed.insert(property.into());
        self
    }

    /// Appends a column diff.
    #[must_use]
    pub fn with_column(mut self, diff: Diff<Column>) -> Self {
        self.columns.push(diff);
        self
    }

    /// Appends a constraint diff.
    #[must_use]
    pub fn with_constraint(mut self, diff: Diff<Constraint>) -> Self {
        self.constraints.push(diff);
        self
    }

    /// Appends an index diff.
    #[must_use]
    pub fn with_index(mut self, diff: Diff<Index>) -> Self {
        self.indexes.push(diff);
        self
    }

    /// The change state.
    #[must_use]
    pub const fn state(&self) -> ChangeState {
        self.state
    }

    /// The original side, absent for `Added`.
    #[must_use]
    pub const fn original(&self) -> Option<&Table> {
        self.original.as_ref()
    }

    /// The target side, absent for `Deleted`.
    #[must_use]
    pub const fn target(&self) -> Option<&Table> {
        self.target.as_ref()
    }

    /// Whichever side is present, preferring the target.
    #[must_use]
    pub fn present(&self) -> &Table {
        match (&self.target, &self.original) {
            (Some(t), _) => t,
            (None, Some(o)) => o,
            (None, None) => unreachable!("table diff with neither side"),
        }
    }

    /// The changed table-level property labels.
    #[must_use]
    pub const fn changed(&self) -> &BTreeSet<String> {
        &self.changed
    }

    /// Whether the table's NAME property changed.
    #[must_use]
    pub fn name_changed(&self) -> bool {
        self.changed.contains(super::label::NAME)
    }

    /// Whether any column/constraint/index change is recorded.
    #[must_use]
    pub fn has_member_changes(&self) -> bool {
        !self.columns.is_empty() || !self.constraints.is_empty() || !self.indexes.is_empty()
    }
}

/// A difference node over a schema, with child collections per
/// object category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    state: ChangeState,
    original: Option<Schema>,
    target: Option<Schema>,
    changed: BTreeSet<String>,
    /// Sequence changes.
    pub sequences: Vec<Diff<Sequence>>,
    /// Domain changes.
    pub domains: Vec<Diff<Domain>>,
    /// Function changes.
    pub functions: Vec<Diff<Function>>,
    /// Procedure changes.
    pub procedures: Vec<Diff<Procedure>>,
    /// Table changes.
    pub tables: Vec<TableDiff>,
    /// View changes.
    pub views: Vec<Diff<View>>,
    /// Trigger changes.
    pub triggers: Vec<Diff<Trigger>>,
}

impl SchemaDiff {
    /// A node for a schema present only in the target.
    #[must_use]
    pub fn added(target: Schema) -> Self {
        Self::build(ChangeState::Added, None, Some(target))
    }

    /// A node for a schema present only in the original.
    #[must_use]
    pub fn deleted(original: Schema) -> Self {
        Self::build(ChangeState::Deleted, Some(original), None)
    }

    /// A node for a schema present on both sides.
    #[must_use]
    pub fn modified(original: Schema, target: Schema) -> Self {
        Self::build(ChangeState::Modified, Some(original), Some(target))
    }

    fn build(state: ChangeState, original: Option<Schema>, target: Option<Schema>) -> Self {
        Self {
            state,
            original,
            target,
            changed: BTreeSet::new(),
            sequences: Vec::new(),
            domains: Vec::new(),
            functions: Vec::new(),
            procedures: Vec::new(),
            tables: Vec::new(),
            views: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Records a changed schema-level property label.
    #[must_use]
    pub fn with_changed(mut self, property: impl Into<String>) -> Self {
        self.changed.insert(property.into());
        self
    }

    /// Appends a table diff.
    #[must_use]
    pub fn with_table(mut self, diff: TableDiff) -> Self {
        self.tables.push(diff);
        self
    }

    /// The change state.
    #[must_use]
    pub const fn state(&self) -> ChangeState {
        self.state
    }

    /// The original side, absent for `Added`.
    #[must_use]
    pub const fn original(&self) -> Option<&Schema> {
        self.original.as_ref()
    }

    /// The target side, absent for `Deleted`.
    #[must_use]
    pub const fn target(&self) -> Option<&Schema> {
        self.target.as_ref()
    }

    /// Whichever side is present, preferring the target.
    #[must_use]
    pub fn present(&self) -> &Schema {
        match (&self.target, &self.original) {
            (Some(t), _) => t,
            (None, Some(o)) => o,
            (None, None) => unreachable!("schema diff with neither side"),
        }
    }

    /// The changed schema-level property labels.
    #[must_use]
    pub const fn changed(&self) -> &BTreeSet<String> {
        &self.changed
    }

    /// Whether any sub-object change is recorded.
    #[must_use]
    pub fn has_member_changes(&self) -> bool {
        !self.sequences.is_empty()
            || !self.domains.is_empty()
            || !self.functions.is_empty()
            || !self.procedures.is_empty()
            || !self.tables.is_empty()
            || !self.views.is_empty()
            || !self.triggers.is_empty()
    }
}

/// A difference node over a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDiff {
    state: ChangeState,
    original: Option<Catalog>,
    target: Option<Catalog>,
    /// Tablespace changes.
    pub tablespaces: Vec<Diff<Tablespace>>,
    /// Role changes.
    pub roles: Vec<Diff<Role>>,
    /// Schema changes.
    pub schemas: Vec<SchemaDiff>,
    /// Privilege changes.
    pub privileges: Vec<Diff<Privilege>>,
}

impl CatalogDiff {
    /// A node for a catalog present on both sides.
    #[must_use]
    pub fn modified(original: Catalog, target: Catalog) -> Self {
        Self {
            state: ChangeState::Modified,
            original: Some(original),
            target: Some(target),
            tablespaces: Vec::new(),
            roles: Vec::new(),
            schemas: Vec::new(),
            privileges: Vec::new(),
        }
    }

    /// The change state.
    #[must_use]
    pub const fn state(&self) -> ChangeState {
        self.state
    }

    /// The original side.
    #[must_use]
    pub const fn original(&self) -> Option<&Catalog> {
        self.original.as_ref()
    }

    /// The target side.
    #[must_use]
    pub const fn target(&self) -> Option<&Catalog> {
        self.target.as_ref()
    }

    /// Whether any child change is recorded.
    #[must_use]
    pub fn has_member_changes(&self) -> bool {
        !self.tablespaces.is_empty()
            || !self.roles.is_empty()
            || !self.schemas.is_empty()
            || !self.privileges.is_empty()
    }
}

/// Any difference node, tagged for registry dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiffNode {
    /// A catalog diff.
    Catalog(CatalogDiff),
    /// A schema diff.
    Schema(SchemaDiff),
    /// A table diff.
    Table(TableDiff),
    /// A constraint diff.
    Constraint(Diff<Constraint>),
    /// An index diff.
    Index(Diff<Index>),
    /// A sequence diff.
    Sequence(Diff<Sequence>),
    /// A domain diff.
    Domain(Diff<Domain>),
    /// A function diff.
    Function(Diff<Function>),
    /// A procedure diff.
    Procedure(Diff<Procedure>),
    /// A view diff.
    View(Diff<View>),
    /// A trigger diff.
    Trigger(Diff<Trigger>),
    /// A tablespace diff.
    Tablespace(Diff<Tablespace>),
    /// A role diff.
    Role(Diff<Role>),
    /// A privilege diff.
    Privilege(Diff<Privilege>),
    /// A row batch diff.
    Rows(Diff<RowSet>),
}

impl DiffNode {
    /// The change state of the node.
    #[must_use]
    pub const fn state(&self) -> ChangeState {
        match self {
            Self::Catalog(d) => d.state(),
            Self::Schema(d) => d.state(),
            Self::Table(d) => d.state(),
            Self::Constraint(d) => d.state(),
            Self::Index(d) => d.state(),
            Self::Sequence(d) => d.state(),
            Self::Domain(d) => d.state(),
            Self::Function(d) => d.state(),
            Self::Procedure(d) => d.state(),
            Self::View(d) => d.state(),
            Self::Trigger(d) => d.state(),
            Self::Tablespace(d) => d.state(),
            Self::Role(d) => d.state(),
            Self::Privilege(d) => d.state(),
            Self::Rows(d) => d.state(),
        }
    }

    /// The object kind of the node, usable as a registry type
    /// witness regardless of which side is present.
    #[must_use]
    pub const fn object_kind(&self) -> ObjectKind {
        match self {
            Self::Catalog(_) => ObjectKind::Catalog,
            Self::Schema(_) => ObjectKind::Schema,
            Self::Table(_) => ObjectKind::Table,
            Self::Constraint(_) => ObjectKind::Constraint,
            Self::Index(_) => ObjectKind::Index,
            Self::Sequence(_) => ObjectKind::Sequence,
            Self::Domain(_) => ObjectKind::Domain,
            Self::Function(_) => ObjectKind::Function,
            Self::Procedure(_) => ObjectKind::Procedure,
            Self::View(_) => ObjectKind::View,
            Self::Trigger(_) => ObjectKind::Trigger,
            Self::Tablespace(_) => ObjectKind::Tablespace,
            Self::Role(_) => ObjectKind::Role,
            Self::Privilege(_) => ObjectKind::Privilege,
            Self::Rows(_) => ObjectKind::Rows,
        }
    }

    /// The original-side object, cloned into the tagged union.
    #[must_use]
    pub fn original_object(&self) -> Option<SchemaObject> {
        match self {
            Self::Catalog(d) => d.original().cloned().map(SchemaObject::Catalog),
            Self::Schema(d) => d.original().cloned().map(SchemaObject::Schema),
            Self::Table(d) => d.original().cloned().map(SchemaObject::Table),
            Self::Constraint(d) => d.original().cloned().map(SchemaObject::Constraint),
            Self::Index(d) => d.original().cloned().map(SchemaObject::Index),
            Self::Sequence(d) => d.original().cloned().map(SchemaObject::Sequence),
            Self::Domain(d) => d.original().cloned().map(SchemaObject::Domain),
            Self::Function(d) => d.original().cloned().map(SchemaObject::Function),
            Self::Procedure(d) => d.original().cloned().map(SchemaObject::Procedure),
            Self::View(d) => d.original().cloned().map(SchemaObject::View),
            Self::Trigger(d) => d.original().cloned().map(SchemaObject::Trigger),
            Self::Tablespace(d) => d.original().cloned().map(SchemaObject::Tablespace),
            Self::Role(d) => d.original().cloned().map(SchemaObject::Role),
            Self::Privilege(d) => d.original().cloned().map(SchemaObject::Privilege),
            Self::Rows(d) => d.original().cloned().map(SchemaObject::Rows),
        }
    }

    /// The target-side object, cloned into the tagged union.
    #[must_use]
    pub fn target_object(&self) -> Option<SchemaObject> {
        match self {
            Self::Catalog(d) => d.target().cloned().map(SchemaObject::Catalog),
            Self::Schema(d) => d.target().cloned().map(SchemaObject::Schema),
            Self::Table(d) => d.target().cloned().map(SchemaObject::Table),
            Self::Constraint(d) => d.target().cloned().map(SchemaObject::Constraint),
            Self::Index(d) => d.target().cloned().map(SchemaObject::Index),
            Self::Sequence(d) => d.target().cloned().map(SchemaObject::Sequence),
            Self::Domain(d) => d.target().cloned().map(SchemaObject::Domain),
            Self::Function(d) => d.target().cloned().map(SchemaObject::Function),
            Self::Procedure(d) => d.target().cloned().map(SchemaObject::Procedure),
            Self::View(d) => d.target().cloned().map(SchemaObject::View),
            Self::Trigger(d) => d.target().cloned().map(SchemaObject::Trigger),
            Self::Tablespace(d) => d.target().cloned().map(SchemaObject::Tablespace),
            Self::Role(d) => d.target().cloned().map(SchemaObject::Role),
            Self::Privilege(d) => d.target().cloned().map(SchemaObject::Privilege),
            Self::Rows(d) => d.target().cloned().map(SchemaObject::Rows),
        }
    }

    /// The side a builder producing statements for `state` should
    /// act on: the original for deletions, the target otherwise,
    /// falling back to whichever side exists.
    #[must_use]
    pub fn object_for(&self, state: Option<ChangeState>) -> Option<SchemaObject> {
        match state {
            Some(ChangeState::Deleted) => self.original_object().or_else(|| self.target_object()),
            _ => self.target_object().or_else(|| self.original_object()),
        }
    }
}
