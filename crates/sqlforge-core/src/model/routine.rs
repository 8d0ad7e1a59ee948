//! Stored routines and domains.

use serde::{Deserialize, Serialize};

use super::types::DataType;

/// A stored function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Raw argument list, without the surrounding parentheses.
    pub arguments: String,
    /// Return type literal, if declared.
    pub returns: Option<String>,
    /// Implementation language, if declared.
    pub language: Option<String>,
    /// Function body, emitted verbatim.
    pub body: String,
}

impl Function {
    /// Creates a function with an empty argument list.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: String::new(),
            returns: None,
            language: None,
            body: body.into(),
        }
    }

    /// Sets the raw argument list.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Sets the return type literal.
    #[must_use]
    pub fn returning(mut self, returns: impl Into<String>) -> Self {
        self.returns = Some(returns.into());
        self
    }

    /// Sets the implementation language.
    #[must_use]
    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// A stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// Procedure name.
    pub name: String,
    /// Raw argument list, without the surrounding parentheses.
    pub arguments: String,
    /// Implementation language, if declared.
    pub language: Option<String>,
    /// Procedure body, emitted verbatim.
    pub body: String,
}

impl Procedure {
    /// Creates a procedure with an empty argument list.
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: String::new(),
            language: None,
            body: body.into(),
        }
    }

    /// Sets the raw argument list.
    #[must_use]
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }
}

/// A domain: a named, constrained base type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name.
    pub name: String,
    /// Underlying data type.
    pub data_type: DataType,
    /// Whether values may be NULL.
    pub nullable: bool,
    /// Check expression over `VALUE`, if any.
    pub check: Option<String>,
}

impl Domain {
    /// Creates a nullable, unconstrained domain.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            check: None,
        }
    }

    /// Marks the domain NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Adds a check expression.
    #[must_use]
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }
}
