//! Schema object model.
//!
//! Read-only value objects describing database structure: catalogs,
//! schemas, tables, columns, constraints, indexes, sequences, views,
//! triggers, routines and rows of data. The generation engine never
//! mutates these; it only walks them (or difference trees over them)
//! and emits SQL.
//!
//! All types are plain `Clone + PartialEq + serde` values with fluent
//! `#[must_use]` setters, so snapshots can be built in code, loaded
//! from JSON, or produced by an external introspection layer.

mod catalog;
mod column;
mod constraint;
mod index;
mod object;
mod row;
mod routine;
mod schema;
mod sequence;
mod table;
mod trigger;
mod types;
mod value;
mod view;

pub use catalog::{Catalog, Privilege, Role, Tablespace};
pub use column::Column;
pub use constraint::{Constraint, ReferentialAction};
pub use index::{Index, IndexKind};
pub use object::{ObjectKind, SchemaObject};
pub use row::{Row, RowSet};
pub use routine::{Domain, Function, Procedure};
pub use schema::Schema;
pub use sequence::Sequence;
pub use table::{PartitionMethod, Partitioning, Table};
pub use trigger::{Trigger, TriggerEvent, TriggerTiming};
pub use types::{DataType, DbDataType, TypeFamily};
pub use value::Value;
pub use view::View;
