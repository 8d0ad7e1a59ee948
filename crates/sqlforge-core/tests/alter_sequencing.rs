//! End-to-end checks of the alter sequencers: self-diff idempotence,
//! the ordering invariants, and cross-table sequencing.

use sqlforge_core::dialect::{GenericDialect, PostgresDialect};
use sqlforge_core::diff::{diff_catalogs, diff_schemas, diff_tables, DiffNode};
use sqlforge_core::model::{
    Catalog, Column, Constraint, DataType, Index, Privilege, Role, Schema, SchemaObject, Sequence,
    Table,
};
use sqlforge_core::{BuilderRegistry, GenContext, Options, Statement, StatementKind};

fn sample_schema() -> Schema {
    Schema::new("app")
        .sequence(Sequence::new("seq_orders_id"))
        .table(
            Table::new("users")
                .column(Column::new("id", DataType::Bigint).identity())
                .column(Column::new("email", DataType::Varchar(Some(255))).not_null())
                .constraint(Constraint::primary_key("pk_users", &["id"])),
        )
        .table(
            Table::new("orders")
                .column(Column::new("id", DataType::Bigint).identity())
                .column(Column::new("user_id", DataType::Bigint).not_null())
                .constraint(Constraint::primary_key("pk_orders", &["id"]))
                .constraint(Constraint::foreign_key(
                    "fk_orders_user",
                    &["user_id"],
                    "users",
                    &["id"],
                ))
                .index(Index::new("ix_orders_user", &["user_id"])),
        )
}

#[test]
fn diffing_a_schema_against_itself_yields_no_statements() {
    let schema = sample_schema();
    assert!(diff_schemas(&schema, &schema).is_none());

    let catalog = Catalog::new("main")
        .role(Role::new("reporting"))
        .schema(sample_schema())
        .privilege(Privilege::new(&["SELECT"], "app.users", "reporting"));
    assert!(diff_catalogs(&catalog, &catalog).is_none());

    for table in &schema.tables {
        assert!(diff_tables(table, table).is_none());
    }
}

#[test]
fn constraint_and_index_operations_bracket_the_column_change() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = PostgresDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    // user_id changes type; the FK and the index that reference it
    // are replaced in the same step.
    let original = sample_schema();
    let mut target = sample_schema();
    {
        let orders = &mut target.tables[1];
        orders.columns[1].data_type = DataType::Integer;
        orders.constraints[1] =
            Constraint::foreign_key("fk_orders_user2", &["user_id"], "users", &["id"]);
        if let Constraint::ForeignKey { table, .. } = &mut orders.constraints[1] {
            *table = String::from("orders");
        }
        orders.indexes[0] = {
            let mut i = Index::new("ix_orders_user2", &["user_id"]);
            i.table = String::from("orders");
            i
        };
    }

    let diff = diff_schemas(&original, &target).expect("diff");
    let stmts = ctx.build_diff(&DiffNode::Schema(diff)).expect("alter");
    let texts: Vec<&str> = stmts.iter().map(Statement::text).collect();

    let pos = |needle: &str| {
        texts
            .iter()
            .position(|t| t.contains(needle))
            .unwrap_or_else(|| panic!("missing {needle}: {texts:?}"))
    };

    let alter_column = pos("ALTER COLUMN user_id SET DATA TYPE INTEGER");
    assert!(pos("DROP CONSTRAINT fk_orders_user") < alter_column);
    assert!(pos("DROP INDEX ix_orders_user") < alter_column);
    assert!(alter_column < pos("ADD CONSTRAINT fk_orders_user2"));
    assert!(alter_column < pos("CREATE INDEX ix_orders_user2"));
}

#[test]
fn schema_diff_drops_tables_after_dependents_and_creates_dependencies_first() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    // Replace the users/orders pair with a fresh dependent pair.
    let original = sample_schema();
    let target = Schema::new("app")
        .sequence(Sequence::new("seq_orders_id"))
        .table(
            Table::new("accounts")
                .column(Column::new("id", DataType::Bigint).identity())
                .constraint(Constraint::primary_key("pk_accounts", &["id"])),
        )
        .table(
            Table::new("invoices")
                .column(Column::new("id", DataType::Bigint).identity())
                .column(Column::new("account_id", DataType::Bigint).not_null())
                .constraint(Constraint::foreign_key(
                    "fk_invoices_account",
                    &["account_id"],
                    "accounts",
                    &["id"],
                )),
        );

    let diff = diff_schemas(&original, &target).expect("diff");
    let stmts = ctx.build_diff(&DiffNode::Schema(diff)).expect("alter");
    let texts: Vec<&str> = stmts.iter().map(Statement::text).collect();

    let pos = |needle: &str| {
        texts
            .iter()
            .position(|t| t.starts_with(needle))
            .unwrap_or_else(|| panic!("missing {needle}: {texts:?}"))
    };

    // Deletions first (orders before users, reverse dependency),
    // then additions (accounts before invoices, dependency order).
    assert!(pos("DROP TABLE orders") < pos("DROP TABLE users"));
    assert!(pos("DROP TABLE users") < pos("CREATE TABLE accounts"));
    assert!(pos("CREATE TABLE accounts") < pos("CREATE TABLE invoices"));
}

#[test]
fn alter_statements_keep_the_alter_kind() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let original = Table::new("t").column(Column::new("n", DataType::Integer));
    let mut target = original.clone();
    target.columns[0].default = Some(sqlforge_core::model::Value::Int(0));

    let diff = diff_tables(&original, &target).expect("diff");
    let stmts = ctx.build_diff(&DiffNode::Table(diff)).expect("alter");
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].kind(), StatementKind::Alter);
    assert_eq!(stmts[0].text(), "ALTER TABLE t ALTER COLUMN n SET DEFAULT 0");
}

#[test]
fn whole_table_alter_via_surrogates_after_deregistration() {
    // A dialect that cannot alter in place deregisters the exact
    // binding; ALTER then decomposes into DROP + CREATE.
    let mut registry = BuilderRegistry::with_defaults();
    registry.deregister(sqlforge_core::model::ObjectKind::Table, StatementKind::Alter);

    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let original = Table::new("t").column(Column::new("id", DataType::Integer));
    let mut target = original.clone();
    target.columns[0].nullable = false;

    let diff = diff_tables(&original, &target).expect("diff");
    let stmts = ctx.build_diff(&DiffNode::Table(diff)).expect("alter");
    let texts: Vec<&str> = stmts.iter().map(Statement::text).collect();

    assert_eq!(texts.len(), 2);
    assert!(texts[0].starts_with("DROP TABLE t"));
    assert!(texts[1].starts_with("CREATE TABLE t"));
}

#[test]
fn rows_objects_pass_through_schema_object_dispatch() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let table = Table::new("settings")
        .column(Column::new("key", DataType::Text).not_null())
        .column(Column::new("value", DataType::Text))
        .constraint(Constraint::primary_key("pk_settings", &["key"]));
    let rows = sqlforge_core::model::RowSet::new(table)
        .row(sqlforge_core::model::Row::new().set("key", "theme").set("value", "dark"));

    let stmts = ctx
        .build(StatementKind::InsertRow, &SchemaObject::Rows(rows))
        .expect("insert");
    assert_eq!(
        stmts[0].text(),
        "INSERT INTO settings (key, value) VALUES ('theme', 'dark')"
    );
}
