//! Tablespace, role and privilege builders.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_privilege, expect_role, expect_tablespace, StatementBuilder};

/// Builds CREATE TABLESPACE.
pub struct CreateTablespaceBuilder;

impl StatementBuilder for CreateTablespaceBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let tablespace = expect_tablespace(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE TABLESPACE").ident(&tablespace.name);
        if let Some(location) = &tablespace.location {
            w.kw("LOCATION").raw(&format!("'{location}'"));
        }
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(tablespace.clone()),
        ])
    }
}

/// Builds DROP TABLESPACE.
pub struct DropTablespaceBuilder;

impl StatementBuilder for DropTablespaceBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let tablespace = expect_tablespace(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP TABLESPACE").ident(&tablespace.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(tablespace.clone()),
        ])
    }
}

/// Builds CREATE ROLE.
pub struct CreateRoleBuilder;

impl StatementBuilder for CreateRoleBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let role = expect_role(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE ROLE").ident(&role.name);
        if role.login {
            w.kw("WITH LOGIN");
        }
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(role.clone()),
        ])
    }
}

/// Builds DROP ROLE.
pub struct DropRoleBuilder;

impl StatementBuilder for DropRoleBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let role = expect_role(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP ROLE").ident(&role.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(role.clone()),
        ])
    }
}

/// Builds GRANT.
pub struct GrantBuilder;

impl StatementBuilder for GrantBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Grant
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let privilege = expect_privilege(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("GRANT").raw(&privilege.actions.join(", "));
        w.kw("ON").raw(&privilege.on_object);
        w.kw("TO").ident(&privilege.grantee);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(privilege.clone()),
        ])
    }
}

/// Builds REVOKE.
pub struct RevokeBuilder;

impl StatementBuilder for RevokeBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Revoke
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let privilege = expect_privilege(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("REVOKE").raw(&privilege.actions.join(", "));
        w.kw("ON").raw(&privilege.on_object);
        w.kw("FROM").ident(&privilege.grantee);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(privilege.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::diff::{ChangeState, Diff, DiffNode};
    use crate::model::Privilege;
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    #[test]
    fn grant_and_revoke() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let p = Privilege::new(&["SELECT", "UPDATE"], "app.users", "reporting");
        let granted = ctx
            .build(StatementKind::Grant, &SchemaObject::Privilege(p.clone()))
            .expect("grant");
        assert_eq!(
            granted[0].text(),
            "GRANT SELECT, UPDATE ON app.users TO reporting"
        );
        assert_eq!(granted[0].kind(), StatementKind::Grant);

        let revoked = ctx
            .build(StatementKind::Revoke, &SchemaObject::Privilege(p))
            .expect("revoke");
        assert_eq!(
            revoked[0].text(),
            "REVOKE SELECT, UPDATE ON app.users FROM reporting"
        );
    }

    #[test]
    fn modified_privilege_revokes_then_grants() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let old = Privilege::new(&["SELECT"], "app.users", "reporting");
        let new = Privilege::new(&["SELECT", "INSERT"], "app.users", "reporting");
        let node = DiffNode::Privilege(Diff::modified(old, new));
        assert_eq!(node.state(), ChangeState::Modified);

        let stmts = ctx.build_diff(&node).expect("diff");
        assert_eq!(stmts.len(), 2);
        assert!(stmts[0].text().starts_with("REVOKE SELECT ON"));
        assert!(stmts[1].text().starts_with("GRANT SELECT, INSERT ON"));
    }
}
