//! Trigger builders.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::SchemaObject;
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{expect_trigger, StatementBuilder};

/// Builds CREATE TRIGGER.
pub struct CreateTriggerBuilder;

impl StatementBuilder for CreateTriggerBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let trigger = expect_trigger(self.kind(), object)?;
        let mut w = ctx.writer();
        w.kw("CREATE TRIGGER").ident(&trigger.name);
        w.kw(trigger.timing.as_sql());
        for (i, event) in trigger.events.iter().enumerate() {
            if i > 0 {
                w.kw("OR");
            }
            w.kw(event.as_sql());
        }
        w.kw("ON").ident(&trigger.table);
        if trigger.for_each_row {
            w.kw("FOR EACH ROW");
        }
        w.raw(&trigger.body);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(trigger.clone()),
        ])
    }
}

/// Builds DROP TRIGGER (dialect-shaped: some engines name the
/// table, some do not).
pub struct DropTriggerBuilder;

impl StatementBuilder for DropTriggerBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let trigger = expect_trigger(self.kind(), object)?;
        let sql = ctx.dialect.drop_trigger_sql(&ctx.options, trigger);
        Ok(vec![
            Statement::new(self.kind(), sql).with_original(trigger.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::model::{Trigger, TriggerEvent, TriggerTiming};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    fn audit_trigger() -> Trigger {
        Trigger::new(
            "trg_users_audit",
            "users",
            &[TriggerEvent::Insert, TriggerEvent::Update],
            "EXECUTE FUNCTION audit_users()",
        )
        .timing(TriggerTiming::After)
    }

    #[test]
    fn create_trigger_lists_events() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Trigger(audit_trigger()))
            .expect("create");
        assert_eq!(
            stmts[0].text(),
            "CREATE TRIGGER trg_users_audit AFTER INSERT OR UPDATE ON users \
             FOR EACH ROW EXECUTE FUNCTION audit_users()"
        );
    }

    #[test]
    fn drop_trigger_is_dialect_shaped() {
        let registry = BuilderRegistry::with_defaults();
        let generic = GenericDialect::new();
        let ctx = GenContext::new(&registry, &generic, Options::new());
        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Trigger(audit_trigger()))
            .expect("drop");
        assert_eq!(stmts[0].text(), "DROP TRIGGER trg_users_audit");

        let pg = PostgresDialect::new();
        let ctx = GenContext::new(&registry, &pg, Options::new());
        let stmts = ctx
            .build(StatementKind::Drop, &SchemaObject::Trigger(audit_trigger()))
            .expect("drop");
        assert_eq!(stmts[0].text(), "DROP TRIGGER trg_users_audit ON users");
    }
}
