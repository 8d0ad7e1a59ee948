//! Sequence builders.
//!
//! Dialects without sequences (e.g. MySQL) make these silent no-ops.

use crate::error::Result;
use crate::kind::StatementKind;
use crate::model::{SchemaObject, Sequence};
use crate::registry::GenContext;
use crate::stmt::Statement;
use crate::writer::SqlWriter;

use super::{expect_sequence, StatementBuilder};

fn sequence_clauses(w: &mut SqlWriter, sequence: &Sequence) {
    w.kw("START WITH").raw(&sequence.start.to_string());
    w.kw("INCREMENT BY").raw(&sequence.increment.to_string());
    if let Some(min) = sequence.min_value {
        w.kw("MINVALUE").raw(&min.to_string());
    }
    if let Some(max) = sequence.max_value {
        w.kw("MAXVALUE").raw(&max.to_string());
    }
    if let Some(cache) = sequence.cache {
        w.kw("CACHE").raw(&cache.to_string());
    }
    if sequence.cycle {
        w.kw("CYCLE");
    }
}

/// Builds CREATE SEQUENCE.
pub struct CreateSequenceBuilder;

impl StatementBuilder for CreateSequenceBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let sequence = expect_sequence(self.kind(), object)?;
        if !ctx.dialect.supports_sequences() {
            return Ok(Vec::new());
        }
        let mut w = ctx.writer();
        w.kw("CREATE SEQUENCE").ident(&sequence.name);
        sequence_clauses(&mut w, sequence);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(sequence.clone()),
        ])
    }
}

/// Builds ALTER SEQUENCE from the target definition.
pub struct AlterSequenceBuilder;

impl StatementBuilder for AlterSequenceBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Alter
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let sequence = expect_sequence(self.kind(), object)?;
        if !ctx.dialect.supports_sequences() {
            return Ok(Vec::new());
        }
        let mut w = ctx.writer();
        w.kw("ALTER SEQUENCE").ident(&sequence.name);
        w.kw("INCREMENT BY").raw(&sequence.increment.to_string());
        if let Some(min) = sequence.min_value {
            w.kw("MINVALUE").raw(&min.to_string());
        }
        if let Some(max) = sequence.max_value {
            w.kw("MAXVALUE").raw(&max.to_string());
        }
        w.kw("RESTART WITH").raw(&sequence.start.to_string());
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_target(sequence.clone()),
        ])
    }
}

/// Builds DROP SEQUENCE.
pub struct DropSequenceBuilder;

impl StatementBuilder for DropSequenceBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Drop
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let sequence = expect_sequence(self.kind(), object)?;
        if !ctx.dialect.supports_sequences() {
            return Ok(Vec::new());
        }
        let mut w = ctx.writer();
        w.kw("DROP SEQUENCE");
        if ctx.options.drop_if_exists && ctx.dialect.supports_exists_guards() {
            w.kw("IF EXISTS");
        }
        w.ident(&sequence.name);
        Ok(vec![
            Statement::new(self.kind(), w.finish()).with_original(sequence.clone()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, MySqlDialect};
    use crate::options::Options;
    use crate::registry::BuilderRegistry;

    #[test]
    fn create_sequence_with_clauses() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = GenericDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let seq = Sequence::new("seq_users_id").start_with(100).cached(20).cycling();
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Sequence(seq))
            .expect("create");
        assert_eq!(
            stmts[0].text(),
            "CREATE SEQUENCE seq_users_id START WITH 100 INCREMENT BY 1 CACHE 20 CYCLE"
        );
    }

    #[test]
    fn sequences_vanish_on_dialects_without_them() {
        let registry = BuilderRegistry::with_defaults();
        let dialect = MySqlDialect::new();
        let ctx = GenContext::new(&registry, &dialect, Options::new());

        let seq = Sequence::new("seq_users_id");
        let stmts = ctx
            .build(StatementKind::Create, &SchemaObject::Sequence(seq))
            .expect("create");
        assert!(stmts.is_empty());
    }
}
