//! Domain, function and procedure builders.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_domain, expect_function, expect_procedure, StatementBuilder};

/// Builds CREATE DOMAIN. Silently omitted on dialects without
/// domains.
pub struct CreateDomainBuilder;

impl StatementBuilder for CreateDomainBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let domain = expect_domain(self.kind(), object)?;
        if !ctx.dialect.supports_domains() {
            return Ok(Vec::new());
        }
        let mut w = ctx.writer();
        w.kw("CREATE DOMAIN").ident(&domain.name).kw("AS");
        w.raw(&ctx.dialect.map_data_type(&domain.data_type));
        if !domain.nullable {
            w.kw("NOT NULL");
        }
        if let Some(check) = &domain.check {
            w.kw("CHECK").lparen().push(check).rparen();
        }
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(domain.clone()),
        ])
    }
}

/// Builds DROP DOMAIN.
pub struct DropDomainBuilder;

impl StatementBuilder for DropDomainBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let domain = expect_domain(self.kind(), object)?;
        if !ctx.dialect.supports_domains() {
            return Ok(Vec::new());
        }
        let mut w = ctx.writer();
        w.kw("DROP DOMAIN");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&domain.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(domain.clone()),
        ])
    }
}

/// Builds CREATE FUNCTION.
pub struct CreateFunctionBuilder;

impl StatementBuilder for CreateFunctionBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let function = expect_function(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE FUNCTION").ident(&function.name);
        w.push("(").push(&function.arguments).push(")");
        if let Some(returns) = &function.returns {
            w.kw("RETURNS").raw(returns);
        }
        if let Some(language) = &function.language {
            w.kw("LANGUAGE").raw(language);
        }
        w.kw("AS").raw(&function.body);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(function.clone()),
        ])
    }
}

/// Builds DROP FUNCTION.
pub struct DropFunctionBuilder;

impl StatementBuilder for DropFunctionBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let function = expect_function(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP FUNCTION");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&function.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(function.clone()),
        ])
    }
}

/// Builds CREATE PROCEDURE.
pub struct CreateProcedureBuilder;

impl StatementBuilder for CreateProcedureBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let procedure = expect_procedure(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE PROCEDURE").ident(&procedure.name);
        w.push("(").push(&procedure.arguments).push(")");
        if let Some(language) = &procedure.language {
            w.kw("LANGUAGE").raw(language);
        }
        w.kw("AS").raw(&procedure.body);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(procedure.clone()),
        ])
    }
}

/// Builds DROP PROCEDURE.
pub struct DropProcedureBuilder;

impl StatementBuilder for DropProcedureBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let procedure = expect_procedure(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("DROP PROCEDURE");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&procedure.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(procedure.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::model::{DataType, Domain, Function};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    #[test]
    fn domains_are_gated_on_support() {
        let registry = BuilderRegistry::with_defaults();
        let domain = Domain::new("email_address", DataType::Varchar(Some(255)))
            .not_null()
            .with_check("VALUE LIKE '%@%'");

        let generic = GenericDialect::new();
        let ctx = GenContext::new(&registry, &generic, Options::new());
        assert!(ctx
            .build(StatementKind::Create, &SchemaObject::Domain(domain.clone()))
            .expect("create")
            .is_empty());

        let pg = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &pg, Options::new());
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Domain(domain))
            .expect("create");
        assert_eq!(
            stmts[0].text(),
            "CREATE DOMAIN email_address AS VARCHAR(255) NOT NULL CHECK (VALUE LIKE '%@%')"
        );
    }

    #[test]
    fn create_function_renders_signature() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let f = Function::new("add_one", "$$ SELECT $1 + 1 $$")
            .with_arguments("x integer")
            .returning("integer")
            .in_language("sql");
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Function(f))
            .expect("create");
        assert_eq!(
            stmts[0].text(),
            "CREATE FUNCTION add_one(x integer) RETURNS integer LANGUAGE sql AS $$ SELECT $1 + 1 $$"
        );
    }
}
