//! Constraint builders.
//!
//! Standalone creation is an ALTER TABLE ... ADD; the inline
//! fragment used by CREATE TABLE comes from the dialect's
//! [`constraint_definition`](crate::dialect::Dialect::constraint_definition).

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_constraint, StatementBuilder};

/// Builds ALTER TABLE ... ADD CONSTRAINT. Unsupported constraint
/// kinds are omitted, not errors.
pub struct CreateConstraintBuilder;

impl StatementBuilder for CreateConstraintBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let constraint = expect_constraint(self.kind(), object)?;
        match ctx.dialect.add_constraint_sql(&ctx.options, constraint) {
            Some(sql) => Ok(vec![
                Statement::new(self.kind(), sql).with_target(constraint.clone()),
            ]),
            None => Ok(Vec::new()),
        }
    }
}

/// Builds ALTER TABLE ... DROP CONSTRAINT (dialect-shaped).
pub struct DropConstraintBuilder;

impl StatementBuilder for DropConstraintBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let constraint = expect_constraint(self.kind(), object)?;
        let sql = ctx.dialect.drop_constraint_sql(&ctx.options, constraint);
        Ok(vec![
            Statement::new(self.kind(), sql).with_original(constraint.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::model::{Constraint, ReferentialAction};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    fn fk() -> Constraint {
        let mut c = Constraint::foreign_key("fk_orders_user", &["user_id"], "users", &["id"])
            .on_delete(ReferentialAction::Cascade);
        match &mut c {
            Constraint::ForeignKey { table, .. } => *table = String::from("orders"),
            _ => unreachable!(),
        }
        c
    }

    #[test]
    fn add_foreign_key() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Constraint(fk()))
            .expect("create");
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].text(),
            "ALTER TABLE orders ADD CONSTRAINT fk_orders_user FOREIGN KEY (user_id) \
             REFERENCES users (id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn unsupported_exclude_constraint_is_silently_omitted() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let exclude = Constraint::Exclude {
            name: String::from("ex_overlap"),
            table: String::from("bookings"),
            using: Some(String::from("gist")),
            elements: String::from("room WITH =, during WITH &&"),
        };
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Constraint(exclude.clone()))
            .expect("create");
        assert!(stmts.is_empty());

        // PostgreSQL supports exclusion constraints.
        let pg = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &pg, Options::new());
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Constraint(exclude))
            .expect("create");
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].text().contains("EXCLUDE USING gist"));
    }

    #[test]
    fn drop_constraint() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Constraint(fk()))
            .expect("drop");
        assert_eq!(
            stmts[0].text(),
            "ALTER TABLE orders DROP CONSTRAINT fk_orders_user"
        );
    }
}
