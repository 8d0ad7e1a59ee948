//! Index builders.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_index, StatementBuilder};

/// Builds CREATE INDEX. Unsupported access methods and partial-index
/// conditions are omitted from the emitted statement.
pub struct CreateIndexBuilder;

impl StatementBuilder for CreateIndexBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let index = expect_index(self.kind(), object)?;
        let sql = ctx.dialect.create_index_sql(&ctx.options, None, index);
        Ok(vec![
            Statement::new(self.kind(), sql).with_target(index.clone()),
        ])
    }
}

/// Builds DROP INDEX (dialect-shaped).
pub struct DropIndexBuilder;

impl StatementBuilder for DropIndexBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let index = expect_index(self.kind(), object)?;
        let sql = ctx.dialect.drop_index_sql(&ctx.options, index);
        Ok(vec![
            Statement::new(self.kind(), sql).with_original(index.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, MySqlDialect, PostgresDialect};
    use crate::model::{Index, IndexKind};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    fn gin_index() -> Index {
        let mut i = Index::new("ix_docs_body", &["body"])
            .using(IndexKind::Gin)
            .filtered("deleted_at IS NULL");
        i.table = String::from("docs");
        i
    }

    #[test]
    fn postgres_emits_method_and_condition() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Index(gin_index()))
            .expect("create");
        assert_eq!(
            stmts[0].text(),
            "CREATE INDEX ix_docs_body ON docs USING GIN (body) WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn unsupported_method_and_condition_are_omitted() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Index(gin_index()))
            .expect("create");
        assert_eq!(stmts[0].text(), "CREATE INDEX ix_docs_body ON docs (body)");
    }

    #[test]
    fn mysql_drop_index_names_the_table() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = MySqlDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Index(gin_index()))
            .expect("drop");
        assert_eq!(stmts[0].text(), "DROP INDEX ix_docs_body ON docs");
    }
}
