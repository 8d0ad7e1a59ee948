//! View builders.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_view, StatementBuilder};

/// Builds CREATE VIEW.
pub struct CreateViewBuilder;

impl StatementBuilder for CreateViewBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let view = expect_view(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE VIEW").ident(&view.name);
        if !view.columns.is_empty() {
            w.lparen();
            w.ident_list(&view.columns);
            w.rparen();
        }
        w.kw("AS").raw(&view.query);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(view.clone()),
        ])
    }
}

/// Builds DROP VIEW.
pub struct DropViewBuilder;

impl StatementBuilder for DropViewBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let view = expect_view(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP VIEW");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&view.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(view.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::model::View;
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    #[test]
    fn create_and_drop_view() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new().with_guards());

        let view = View::new("active_users", "SELECT * FROM users WHERE active")
            .with_columns(&["id", "email"]);
        let created = ctx
            .build(StatementKind::Create, &SchemaObject::View(view.clone()))
            .expect("create");
        assert_eq!(
            created[0].text(),
            "CREATE VIEW active_users (id, email) AS SELECT * FROM users WHERE active"
        );

        let dropped = ctx
            .build(StatementKind::Drop, &SchemaObject::View(view))
            .expect("drop");
        assert_eq!(dropped[0].text(), "DROP VIEW IF EXISTS active_users");
    }
}
