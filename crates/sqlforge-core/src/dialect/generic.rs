//! ANSI-flavored generic dialect.

use super::Dialect;

/// A generic, ANSI-flavored dialect.
///
/// Uses the trait's default syntax throughout; useful as a baseline
/// and for engines without a dedicated implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn supports_standard_offset_fetch_rows(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, DataType};
    use crate::options::Options;

    #[test]
    fn ansi_type_mapping() {
        let d = GenericDialect::new();
        assert_eq!(d.map_data_type(&DataType::Bigint), "BIGINT");
        assert_eq!(d.map_data_type(&DataType::Varchar(Some(64))), "VARCHAR(64)");
        assert_eq!(
            d.map_data_type(&DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }),
            "DECIMAL(10, 2)"
        );
        assert_eq!(d.map_data_type(&DataType::Custom("UUID".into())), "UUID");
    }

    #[test]
    fn identity_column_definition_uses_standard_clause() {
        let d = GenericDialect::new();
        let col = Column::new("id", DataType::Bigint).identity();
        assert_eq!(
            d.column_definition(&Options::new(), &col),
            "id BIGINT GENERATED BY DEFAULT AS IDENTITY NOT NULL"
        );
    }

    #[test]
    fn default_value_is_rendered() {
        let d = GenericDialect::new();
        let col = Column::new("active", DataType::Boolean)
            .not_null()
            .default_value(true);
        assert_eq!(
            d.column_definition(&Options::new(), &col),
            "active BOOLEAN NOT NULL DEFAULT TRUE"
        );
    }
}
