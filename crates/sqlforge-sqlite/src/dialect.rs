//! SQLite dialect.

use sqlforge_core::dialect::Dialect;
use sqlforge_core::model::{Column, DataType};
use sqlforge_core::Options;

/// SQLite dialect.
///
/// Types collapse to SQLite's storage affinities; identity columns
/// become `INTEGER PRIMARY KEY AUTOINCREMENT`; identity columns are
/// omitted from generated INSERTs (SQLite has no `DEFAULT` keyword
/// in a VALUES list).
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn supports_sequences(&self) -> bool {
        false
    }

    fn supports_partial_indexes(&self) -> bool {
        true
    }

    fn identity_insert_literal(&self) -> Option<&'static str> {
        None
    }

    fn map_data_type(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Smallint | DataType::Integer | DataType::Bigint | DataType::Boolean => {
                String::from("INTEGER")
            }
            DataType::Real
            | DataType::Double
            | DataType::Decimal { .. } => String::from("REAL"),
            DataType::Char(_)
            | DataType::Varchar(_)
            | DataType::Text
            | DataType::Date
            | DataType::Time
            | DataType::Timestamp => String::from("TEXT"),
            DataType::Blob | DataType::Binary(_) | DataType::Varbinary(_) => String::from("BLOB"),
            DataType::Custom(name) => name.clone(),
        }
    }

    fn column_definition(&self, options: &Options, column: &Column) -> String {
        let mut w = self.writer(options);
        w.ident(&column.name);
        if column.identity {
            // Implies NOT NULL and the rowid alias.
            w.kw("INTEGER PRIMARY KEY AUTOINCREMENT");
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinity_mapping() {
        let d = SqliteDialect::new();
        assert_eq!(d.map_data_type(&DataType::Bigint), "INTEGER");
        assert_eq!(d.map_data_type(&DataType::Varchar(Some(80))), "TEXT");
        assert_eq!(d.map_data_type(&DataType::Timestamp), "TEXT");
        assert_eq!(d.map_data_type(&DataType::Blob), "BLOB");
        assert_eq!(
            d.map_data_type(&DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }),
            "REAL"
        );
    }

    #[test]
    fn identity_column_is_the_rowid_alias() {
        let d = SqliteDialect::new();
        let col = Column::new("id", DataType::Bigint).identity();
        assert_eq!(
            d.column_definition(&Options::new(), &col),
            "id INTEGER PRIMARY KEY AUTOINCREMENT"
        );
    }
}
