//! SQL data types and their dialect-resolved form.

use serde::{Deserialize, Serialize};

/// Dialect-independent SQL data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// 16-bit integer.
    Smallint,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Bigint,
    /// Single-precision float.
    Real,
    /// Double-precision float.
    Double,
    /// Exact decimal with optional precision/scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Unbounded character string.
    Text,
    /// Binary large object.
    Blob,
    /// Fixed-length binary.
    Binary(Option<u32>),
    /// Variable-length binary.
    Varbinary(Option<u32>),
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Timestamp,
    /// Boolean.
    Boolean,
    /// Dialect-specific type emitted verbatim.
    Custom(String),
}

impl DataType {
    /// Returns the broad family this type belongs to.
    ///
    /// Used by value derivation (COALESCE defaults, quoting of
    /// literals) rather than exact type matching.
    #[must_use]
    pub const fn family(&self) -> TypeFamily {
        match self {
            Self::Smallint
            | Self::Integer
            | Self::Bigint
            | Self::Real
            | Self::Double
            | Self::Decimal { .. } => TypeFamily::Numeric,
            Self::Char(_) | Self::Varchar(_) | Self::Text => TypeFamily::Character,
            Self::Blob | Self::Binary(_) | Self::Varbinary(_) => TypeFamily::Binary,
            Self::Date | Self::Time | Self::Timestamp => TypeFamily::DateTime,
            Self::Boolean => TypeFamily::Boolean,
            Self::Custom(_) => TypeFamily::Other,
        }
    }
}

/// Broad classification of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFamily {
    /// Integers, floats, decimals.
    Numeric,
    /// Character strings.
    Character,
    /// Binary strings.
    Binary,
    /// Booleans.
    Boolean,
    /// Dates, times, timestamps.
    DateTime,
    /// Anything else (custom types).
    Other,
}

/// A data type as resolved by a concrete dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbDataType {
    /// The type literal to emit (e.g. `VARCHAR(255)`, `BYTEA`).
    pub literal: String,
    /// The family of the underlying type.
    pub family: TypeFamily,
    /// The literal a dialect considers this type's natural default
    /// (e.g. `0` for numerics, `''` for strings), if it has one.
    pub default_literal: Option<String>,
}
