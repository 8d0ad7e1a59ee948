//! The tagged union the registry dispatches on.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, Privilege, Role, Tablespace};
use super::constraint::Constraint;
use super::index::Index;
use super::routine::{Domain, Function, Procedure};
use super::row::RowSet;
use super::schema::Schema;
use super::sequence::Sequence;
use super::table::Table;
use super::trigger::Trigger;
use super::view::View;

/// The kind tag of a [`SchemaObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectKind {
    /// A catalog.
    Catalog,
    /// A schema.
    Schema,
    /// A table.
    Table,
    /// A constraint.
    Constraint,
    /// An index.
    Index,
    /// A sequence.
    Sequence,
    /// A domain.
    Domain,
    /// A function.
    Function,
    /// A procedure.
    Procedure,
    /// A view.
    View,
    /// A trigger.
    Trigger,
    /// A tablespace.
    Tablespace,
    /// A role.
    Role,
    /// A privilege grant.
    Privilege,
    /// A batch of rows.
    Rows,
}

/// Any schema object, tagged for dispatch.
///
/// Builders receive objects through this enum; handing a builder the
/// wrong variant is a programmer error and fails fast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SchemaObject {
    /// A catalog.
    Catalog(Catalog),
    /// A schema.
    Schema(Schema),
    /// A table.
    Table(Table),
    /// A constraint.
    Constraint(Constraint),
    /// An index.
    Index(Index),
    /// A sequence.
    Sequence(Sequence),
    /// A domain.
    Domain(Domain),
    /// A function.
    Function(Function),
    /// A procedure.
    Procedure(Procedure),
    /// A view.
    View(View),
    /// A trigger.
    Trigger(Trigger),
    /// A tablespace.
    Tablespace(Tablespace),
    /// A role.
    Role(Role),
    /// A privilege grant.
    Privilege(Privilege),
    /// A batch of rows.
    Rows(RowSet),
}

impl SchemaObject {
    /// The kind tag of this object.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
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

    /// The object's own name. Rows answer with their table's name;
    /// privileges with the object they apply to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Catalog(c) => &c.name,
            Self::Schema(s) => &s.name,
            Self::Table(t) => &t.name,
            Self::Constraint(c) => c.name(),
            Self::Index(i) => &i.name,
            Self::Sequence(s) => &s.name,
            Self::Domain(d) => &d.name,
            Self::Function(f) => &f.name,
            Self::Procedure(p) => &p.name,
            Self::View(v) => &v.name,
            Self::Trigger(t) => &t.name,
            Self::Tablespace(t) => &t.name,
            Self::Role(r) => &r.name,
            Self::Privilege(p) => &p.on_object,
            Self::Rows(r) => &r.table.name,
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SchemaObject {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        }
    };
}

impl_from!(Catalog, Catalog);
impl_from!(Schema, Schema);
impl_from!(Table, Table);
impl_from!(Constraint, Constraint);
impl_from!(Index, Index);
impl_from!(Sequence, Sequence);
impl_from!(Domain, Domain);
impl_from!(Function, Function);
impl_from!(Procedure, Procedure);
impl_from!(View, View);
impl_from!(Trigger, Trigger);
impl_from!(Tablespace, Tablespace);
impl_from!(Role, Role);
impl_from!(Privilege, Privilege);
impl_from!(Rows, RowSet);
