//! Error types for the generation engine.

use crate::kind::StatementKind;
use crate::model::ObjectKind;

/// Errors that can occur while generating SQL.
///
/// Generation is pure computation: every variant here signals a
/// programming error in the caller (wrong object handed to a builder,
/// malformed difference node), never a transient condition.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A builder was handed an object of a kind it does not support.
    #[error("{kind:?} builder for {expected:?} objects cannot handle a {actual:?}")]
    UnsupportedObject {
        /// The statement kind the builder produces.
        kind: StatementKind,
        /// The object kind the builder was registered for.
        expected: ObjectKind,
        /// The object kind it actually received.
        actual: ObjectKind,
    },

    /// A difference node violated the diff contract (e.g. a Modified
    /// node missing one of its sides).
    #[error("Malformed difference node: {0}")]
    MalformedDiff(String),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
