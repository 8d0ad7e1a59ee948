//! Whole-script generation: batch ordering, dialect variation,
//! registry overrides and statement serialization.

use sqlforge_core::dialect::{GenericDialect, MySqlDialect, PostgresDialect};
use sqlforge_core::model::{
    Column, Constraint, DataType, ObjectKind, SchemaObject, Table,
};
use sqlforge_core::{
    script, BuilderRegistry, GenContext, Options, QuotePolicy, Statement, StatementBuilder,
    StatementKind,
};

fn referenced() -> Table {
    Table::new("users")
        .column(Column::new("id", DataType::Bigint).identity())
        .constraint(Constraint::primary_key("pk_users", &["id"]))
}

fn referencing() -> Table {
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
}

#[test]
fn create_batches_put_referenced_tables_first_drop_batches_reverse() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let batch = vec![
        SchemaObject::Table(referencing()),
        SchemaObject::Table(referenced()),
    ];

    let created = ctx.build_batch(StatementKind::Create, &batch).expect("create");
    let create_texts: Vec<&str> = created.iter().map(Statement::text).collect();
    let users_pos = create_texts
        .iter()
        .position(|t| t.starts_with("CREATE TABLE users"))
        .expect("users");
    let orders_pos = create_texts
        .iter()
        .position(|t| t.starts_with("CREATE TABLE orders"))
        .expect("orders");
    assert!(users_pos < orders_pos);

    let dropped = ctx.build_batch(StatementKind::Drop, &batch).expect("drop");
    let drop_texts: Vec<&str> = dropped.iter().map(Statement::text).collect();
    assert_eq!(
        drop_texts,
        vec!["DROP TABLE orders", "DROP TABLE users"]
    );
}

#[test]
fn the_same_table_renders_differently_per_dialect() {
    let registry = BuilderRegistry::with_defaults();
    let table = SchemaObject::Table(referenced());
    let options = Options::new().quoting(QuotePolicy::Always);

    let pg = PostgresDialect::new();
    let ctx = GenContext::new(&registry, &pg, options.clone());
    let pg_sql = script(&ctx.build(StatementKind::Create, &table).expect("pg"));
    assert!(pg_sql.contains("\"id\" BIGSERIAL NOT NULL"));

    let my = MySqlDialect::new();
    let ctx = GenContext::new(&registry, &my, options.clone());
    let my_sql = script(&ctx.build(StatementKind::Create, &table).expect("mysql"));
    assert!(my_sql.contains("`id` BIGINT NOT NULL AUTO_INCREMENT"));

    let generic = GenericDialect::new();
    let ctx = GenContext::new(&registry, &generic, options);
    let generic_sql = script(&ctx.build(StatementKind::Create, &table).expect("generic"));
    assert!(generic_sql.contains("\"id\" BIGINT GENERATED BY DEFAULT AS IDENTITY NOT NULL"));
}

#[test]
fn scripts_terminate_statements_but_not_comments() {
    let stmts = vec![
        Statement::comment("schema bootstrap"),
        Statement::empty_line(),
        Statement::new(StatementKind::Create, "CREATE TABLE t (id BIGINT)"),
    ];
    assert_eq!(
        script(&stmts),
        "-- schema bootstrap\n\nCREATE TABLE t (id BIGINT);\n"
    );
}

/// A dialect-specific override: replaces the generated CREATE TABLE
/// with a single canned statement, standing in for the kind of
/// engine-specific rewriting an extension crate performs.
struct CannedCreate;

impl StatementBuilder for CannedCreate {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(
        &self,
        _ctx: &GenContext<'_>,
        object: &SchemaObject,
    ) -> sqlforge_core::Result<Vec<Statement>> {
        Ok(vec![Statement::new(
            StatementKind::Create,
            format!("CREATE TABLE {} AS SELECT 1", object.name()),
        )])
    }
}

#[test]
fn dialect_registries_can_override_a_subset_of_bindings() {
    let mut registry = BuilderRegistry::with_defaults();
    registry.register(ObjectKind::Table, StatementKind::Create, || {
        Box::new(CannedCreate)
    });

    let dialect = GenericDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let stmts = ctx
        .build(StatementKind::Create, &SchemaObject::Table(referenced()))
        .expect("create");
    assert_eq!(stmts[0].text(), "CREATE TABLE users AS SELECT 1");

    // Unrelated bindings are untouched.
    let dropped = ctx
        .build(StatementKind::Drop, &SchemaObject::Table(referenced()))
        .expect("drop");
    assert_eq!(dropped[0].text(), "DROP TABLE users");
}

#[test]
fn statements_round_trip_through_serde() {
    let registry = BuilderRegistry::with_defaults();
    let dialect = PostgresDialect::new();
    let ctx = GenContext::new(&registry, &dialect, Options::new());

    let stmts = ctx
        .build(StatementKind::Create, &SchemaObject::Table(referencing()))
        .expect("create");
    let json = serde_json::to_string(&stmts).expect("serialize");
    let back: Vec<Statement> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(stmts, back);
}
