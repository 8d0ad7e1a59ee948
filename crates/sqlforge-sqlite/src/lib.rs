//! # sqlforge-sqlite
//!
//! SQLite support for the sqlforge engine: the [`SqliteDialect`] and
//! a registry preset ([`sqlite_registry`]) that adapts the default
//! bindings to SQLite's limitations and strengths — ALTER TABLE
//! column changes decompose into DROP + CREATE, and the composite
//! row MERGE is replaced with native `INSERT ... ON CONFLICT`.

mod dialect;
mod upsert;

pub use dialect::SqliteDialect;
pub use upsert::SqliteUpsertBuilder;

use sqlforge_core::model::ObjectKind;
use sqlforge_core::{BuilderRegistry, StatementKind};

/// The default registry, adjusted for SQLite:
///
/// - `(Table, Alter)` is deregistered, so table alterations resolve
///   through the ALTER surrogates (DROP + CREATE) — SQLite cannot
///   alter a column in place.
/// - `(Rows, MergeRow)` gets a native UPSERT builder instead of the
///   insert-select + update composite.
#[must_use]
pub fn sqlite_registry() -> BuilderRegistry {
    let mut registry = BuilderRegistry::with_defaults();
    registry.deregister(ObjectKind::Table, StatementKind::Alter);
    registry.register(ObjectKind::Rows, StatementKind::MergeRow, || {
        Box::new(SqliteUpsertBuilder)
    });
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_core::diff::{diff_tables, DiffNode};
    use sqlforge_core::model::{Column, DataType, Table};
    use sqlforge_core::{GenContext, Options};

    #[test]
    fn table_alterations_decompose_into_drop_and_create() {
        let registry = sqlite_registry();
        let dialect = SqliteDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let original = Table::new("t").column(Column::new("id", DataType::Integer));
        let mut target = original.clone();
        target.columns[0].nullable = false;

        let diff = diff_tables(&original, &target).expect("diff");
        let stmts = ctx.build_diff(&DiffNode::Table(diff)).expect("alter");

        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].text().starts_with("DROP TABLE t"));
        assert!(stmts[1].text().starts_with("CREATE TABLE t"));
    }
}
