//! Table builders: CREATE, DROP, TRUNCATE, LOCK.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_table, qualified_table, StatementBuilder};

/// Builds CREATE TABLE plus the table's standalone index statements.
///
/// Constraints are embedded inline through the dialect's fragment
/// renderer; indexes follow as separate CREATE INDEX statements
/// resolved through the registry so dialect overrides apply.
pub struct CreateTableBuilder;

impl StatementBuilder for CreateTableBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let table = expect_table(self.kind(), object)?;
        let dialect = ctx.dialect;

        let mut w = ctx.writer();
        w.kw("CREATE TABLE");
        if ctx.options.create_if_not_exists && dialect.supports_exists_guards() {
            w.kw("IF NOT EXISTS");
        }
        w.raw(&qualified_table(ctx, table));
        w.push(" (\n");

        let mut parts: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("    {}", dialect.column_definition(&ctx.options, c)))
            .collect();
        for constraint in &table.constraints {
            if let Some(definition) = dialect.constraint_definition(&ctx.options, constraint) {
                parts.push(format!("    {definition}"));
            }
        }
        w.push(&parts.join(",\n"));
        w.push("\n)");

        if let Some(partitioning) = &table.partitioning {
            if let Some(clause) = dialect.partition_by_clause(&ctx.options, partitioning) {
                w.raw(&clause);
            }
        }

        let mut out = vec![Statement::new(self.kind(), w.finish()).with_target(table.clone())];
        for index in &table.indexes {
            let builder = ctx
                .registry
                .resolve(crate::model::ObjectKind::Index, StatementKind::Create);
            out.extend(builder.build(ctx, &SchemaObject::Index(index.clone()))?);
        }
        Ok(out)
    }
}

/// Builds DROP TABLE.
pub struct DropTableBuilder;

impl StatementBuilder for DropTableBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let table = expect_table(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP TABLE");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.raw(&qualified_table(ctx, table));
        if ctx.options.drop_cascade && ctx.dialect.supports_drop_cascade() {
            w.kw("CASCADE");
        }
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(table.clone()),
        ])
    }
}

/// Builds TRUNCATE TABLE.
pub struct TruncateTableBuilder;

impl StatementBuilder for TruncateTableBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Truncate
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let table = expect_table(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("TRUNCATE TABLE").raw(&qualified_table(ctx, table));
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(table.clone()),
        ])
    }
}

/// Builds LOCK TABLE in the policy's lock mode.
pub struct LockTableBuilder;

impl StatementBuilder for LockTableBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Lock
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let table = expect_table(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("LOCK TABLE").raw(&qualified_table(ctx, table));
        w.kw("IN").kw(ctx.options.table.lock_mode.as_sql()).kw("MODE");
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(table.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::model::{Column, Constraint, DataType, Index, Table};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    fn users() -> Table {
        Table::new("users")
            .column(Column::new("id", DataType::Bigint).identity().sequence("seq_users_id"))
            .column(Column::new("email", DataType::Varchar(Some(255))).not_null())
            .constraint(Constraint::primary_key("pk_users", &["id"]))
            .index(Index::new("ix_users_email", &["email"]).unique())
    }

    #[test]
    fn create_table_embeds_identity_and_constraints() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Table(users()))
            .expect("create");
        // One CREATE TABLE plus one CREATE INDEX.
        assert_eq!(stmts.len(), 2);
        let create = stmts[0].text();
        assert!(create.starts_with("CREATE TABLE users (\n"));
        assert!(create.contains("id BIGINT NOT NULL DEFAULT nextval('seq_users_id')"));
        assert!(create.contains("CONSTRAINT pk_users PRIMARY KEY (id)"));
        assert_eq!(stmts[0].kind(), StatementKind::Create);
        assert!(stmts[1].text().contains("CREATE UNIQUE INDEX ix_users_email"));
    }

    #[test]
    fn drop_table_honors_guards_and_cascade() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = PostgresDialect::new();
        let options = Options::new().with_guards().with_drop_cascade();
        let ctx = GenContext::new(&registry, &dialect, options);

        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Table(users()))
            .expect("drop");
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].text(), "DROP TABLE IF EXISTS users CASCADE");
    }

    #[test]
    fn cascade_is_omitted_where_unsupported() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let options = Options::new().with_drop_cascade();
        let ctx = GenContext::new(&registry, &dialect, options);

        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Table(users()))
            .expect("drop");
        assert_eq!(stmts[0].text(), "DROP TABLE users");
    }

    #[test]
    fn lock_table_uses_the_policy_mode() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Lock, &SchemaObject::Table(users()))
            .expect("lock");
        assert_eq!(stmts[0].text(), "LOCK TABLE users IN EXCLUSIVE MODE");
        assert_eq!(stmts[0].kind(), StatementKind::Lock);
    }

    #[test]
    fn wrong_object_kind_fails_fast() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let err = CreateTableBuilder
            .build(
                &ctx,
                &SchemaObject::Sequence(crate::model::Sequence::new("seq")),
            )
            .expect_err("must fail");
        assert!(matches!(
            err,
            crate::error::GenerateError::UnsupportedObject { .. }
        ));
    }
}
