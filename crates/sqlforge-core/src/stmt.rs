//! The generated artifact: one SQL statement plus metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::{SqlCategory, StatementKind};
use crate::model::SchemaObject;

/// One generated SQL statement.
///
/// Immutable after construction apart from terminator attachment.
/// Links back to the schema objects it was generated from so
/// downstream writers/executors can report context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    text: String,
    kind: StatementKind,
    originals: Vec<SchemaObject>,
    targets: Vec<SchemaObject>,
    start_terminator: Option<String>,
    end_terminator: Option<String>,
    terminator: Option<String>,
}

impl Statement {
    /// Creates a statement. Comment and empty-line kinds get no
    /// terminator; everything else defaults to `;`.
    #[must_use]
    pub fn new(kind: StatementKind, text: impl Into<String>) -> Self {
        let terminator = match kind.category() {
            SqlCategory::Comment | SqlCategory::EmptyLine => None,
            _ => Some(String::from(";")),
        };
        Self {
            text: text.into(),
            kind,
            originals: Vec::new(),
            targets: Vec::new(),
            start_terminator: None,
            end_terminator: None,
            terminator,
        }
    }

    /// A formatting-only empty line.
    #[must_use]
    pub fn empty_line() -> Self {
        Self::new(StatementKind::EmptyLine, "")
    }

    /// A `--` comment line.
    #[must_use]
    pub fn comment(text: impl AsRef<str>) -> Self {
        Self::new(StatementKind::Comment, format!("-- {}", text.as_ref()))
    }

    /// Links the statement to the object it was derived from.
    #[must_use]
    pub fn with_original(mut self, object: impl Into<SchemaObject>) -> Self {
        self.originals.push(object.into());
        self
    }

    /// Links the statement to the object it produces.
    #[must_use]
    pub fn with_target(mut self, object: impl Into<SchemaObject>) -> Self {
        self.targets.push(object.into());
        self
    }

    /// Sets wrapper text emitted on its own line before the
    /// statement (e.g. `DELIMITER $$`).
    #[must_use]
    pub fn with_start_terminator(mut self, text: impl Into<String>) -> Self {
        self.start_terminator = Some(text.into());
        self
    }

    /// Sets wrapper text emitted on its own line after the
    /// statement.
    #[must_use]
    pub fn with_end_terminator(mut self, text: impl Into<String>) -> Self {
        self.end_terminator = Some(text.into());
        self
    }

    /// Replaces the statement terminator.
    #[must_use]
    pub fn with_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = Some(terminator.into());
        self
    }

    /// The statement text, without terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The statement kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// The objects the statement was derived from.
    #[must_use]
    pub fn originals(&self) -> &[SchemaObject] {
        &self.originals
    }

    /// The objects the statement produces.
    #[must_use]
    pub fn targets(&self) -> &[SchemaObject] {
        &self.targets
    }

    /// Whether the statement is a comment.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind.category() == SqlCategory::Comment
    }

    /// Whether the statement is a formatting-only empty line.
    #[must_use]
    pub fn is_empty_line(&self) -> bool {
        self.kind.category() == SqlCategory::EmptyLine
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start_terminator {
            writeln!(f, "{start}")?;
        }
        write!(f, "{}", self.text)?;
        if let Some(term) = &self.terminator {
            write!(f, "{term}")?;
        }
        if let Some(end) = &self.end_terminator {
            write!(f, "\n{end}")?;
        }
        Ok(())
    }
}

/// Renders a statement list as an executable script, one statement
/// per line (multi-line statements keep their internal newlines).
#[must_use]
pub fn script(statements: &[Statement]) -> String {
    let mut out = String::new();
    for stmt in statements {
        out.push_str(&stmt.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_statements_get_a_terminator() {
        let s = Statement::new(StatementKind::Create, "CREATE TABLE t (id BIGINT)");
        assert_eq!(s.to_string(), "CREATE TABLE t (id BIGINT);");
    }

    #[test]
    fn comments_and_empty_lines_do_not() {
        assert_eq!(Statement::comment("tables").to_string(), "-- tables");
        assert_eq!(Statement::empty_line().to_string(), "");
        assert!(Statement::empty_line().is_empty_line());
    }

    #[test]
    fn wrapper_terminators_frame_the_text() {
        let s = Statement::new(StatementKind::Create, "CREATE TRIGGER trg ...")
            .with_start_terminator("DELIMITER $$")
            .with_terminator("$$")
            .with_end_terminator("DELIMITER ;");
        assert_eq!(
            s.to_string(),
            "DELIMITER $$\nCREATE TRIGGER trg ...$$\nDELIMITER ;"
        );
    }

    #[test]
    fn script_joins_statements() {
        let stmts = vec![
            Statement::comment("one"),
            Statement::new(StatementKind::Drop, "DROP TABLE t"),
        ];
        assert_eq!(script(&stmts), "-- one\nDROP TABLE t;\n");
    }
}
