//! PostgreSQL dialect.

use crate::model::{Column, DataType, Index, IndexKind, Partitioning, Table, Trigger};
use crate::options::Options;

use super::Dialect;

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn supports_drop_cascade(&self) -> bool {
        true
    }

    fn supports_column_formula(&self) -> bool {
        true
    }

    fn supports_index_kind(&self, _table: Option<&Table>, _index: &Index, _kind: IndexKind) -> bool {
        true
    }

    fn supports_partial_indexes(&self) -> bool {
        true
    }

    fn supports_standard_offset_fetch_rows(&self) -> bool {
        true
    }

    fn supports_domains(&self) -> bool {
        true
    }

    fn supports_exclude_constraints(&self) -> bool {
        true
    }

    fn supports_set_search_path(&self) -> bool {
        true
    }

    fn map_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Blob | DataType::Binary(None) | DataType::Varbinary(None) => {
                String::from("BYTEA")
            }
            DataType::Binary(Some(n)) => format!("BIT({n})"),
            DataType::Varbinary(Some(n)) => format!("VARBIT({n})"),
            other => super::ansi_data_type(other),
        }
    }

    /// Identity columns become SERIAL/BIGSERIAL unless bound to an
    /// explicit sequence, which becomes a nextval default instead.
    fn column_definition(&self, options: &Options, column: &Column) -> String {
        let mut w = self.writer(options);
        w.ident(&column.name);

        if let Some(formula) = &column.formula {
            w.raw(&self.map_data_type(&column.data_type));
            w.kw("GENERATED ALWAYS AS").lparen().push(formula).rparen().kw("STORED");
            return w.finish();
        }

        if column.identity {
            if let Some(sequence) = &column.sequence_name {
                w.raw(&self.map_data_type(&column.data_type));
                if !column.nullable {
                    w.kw("NOT NULL");
                }
                w.kw("DEFAULT").raw(&format!("nextval('{sequence}')"));
                return w.finish();
            }
            let serial = match column.data_type {
                DataType::Smallint => "SMALLSERIAL",
                DataType::Bigint => "BIGSERIAL",
                _ => "SERIAL",
            };
            w.raw(serial);
            if !column.nullable {
                w.kw("NOT NULL");
            }
            return w.finish();
        }

        w.raw(&self.map_data_type(&column.data_type));
        if !column.nullable {
            w.kw("NOT NULL");
        }
        if let Some(default) = &column.default {
            w.kw("DEFAULT").raw(&default.to_literal());
        }
        w.finish()
    }

    fn partition_by_clause(&self, options: &Options, partitioning: &Partitioning) -> Option<String> {
        let mut w = self.writer(options);
        w.kw("PARTITION BY").kw(partitioning.method.as_sql()).lparen();
        w.ident_list(&partitioning.columns);
        w.rparen();
        Some(w.finish())
    }

    fn search_path_sql(&self, options: &Options, schema_name: &str) -> Option<String> {
        let mut w = self.writer(options);
        w.kw("SET search_path TO").ident(schema_name);
        Some(w.finish())
    }

    fn drop_trigger_sql(&self, options: &Options, trigger: &Trigger) -> String {
        let mut w = self.writer(options);
        w.kw("DROP TRIGGER").ident(&trigger.name).kw("ON").ident(&trigger.table);
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartitionMethod;

    #[test]
    fn binary_types_map_to_bytea() {
        let d = PostgresDialect::new();
        assert_eq!(d.map_data_type(&DataType::Blob), "BYTEA");
        assert_eq!(d.map_data_type(&DataType::Varbinary(Some(16))), "VARBIT(16)");
        assert_eq!(d.map_data_type(&DataType::Bigint), "BIGINT");
    }

    #[test]
    fn identity_becomes_serial() {
        let d = PostgresDialect::new();
        let col = Column::new("id", DataType::Bigint).identity();
        assert_eq!(
            d.column_definition(&Options::new(), &col),
            "id BIGSERIAL NOT NULL"
        );
    }

    #[test]
    fn bound_sequence_becomes_nextval_default() {
        let d = PostgresDialect::new();
        let col = Column::new("id", DataType::Bigint)
            .identity()
            .sequence("seq_users_id");
        assert_eq!(
            d.column_definition(&Options::new(), &col),
            "id BIGINT NOT NULL DEFAULT nextval('seq_users_id')"
        );
    }

    #[test]
    fn partition_clause_is_emitted() {
        let d = PostgresDialect::new();
        let p = Partitioning::new(PartitionMethod::Range, &["created_at"]);
        assert_eq!(
            d.partition_by_clause(&Options::new(), &p),
            Some(String::from("PARTITION BY RANGE (created_at)"))
        );
    }

    #[test]
    fn drop_trigger_names_the_table() {
        let d = PostgresDialect::new();
        let trg = Trigger::new("trg_audit", "users", &[], "EXECUTE FUNCTION audit()");
        assert_eq!(
            d.drop_trigger_sql(&Options::new(), &trg),
            "DROP TRIGGER trg_audit ON users"
        );
    }
}
