//! Fluent SQL token writer.
//!
//! Assembles statement text token by token, handling spacing and
//! identifier quoting so builders never concatenate raw strings.
//! Obtained from [`Dialect::writer`](crate::dialect::Dialect::writer),
//! which supplies the dialect's quote characters and the caller's
//! quoting policy.

use crate::options::QuotePolicy;

/// A fluent statement text assembler.
#[derive(Debug, Clone)]
pub struct SqlWriter {
    buf: String,
    open_quote: char,
    close_quote: char,
    policy: QuotePolicy,
}

impl SqlWriter {
    /// Creates a writer with the given quote characters and policy.
    #[must_use]
    pub const fn new(open_quote: char, close_quote: char, policy: QuotePolicy) -> Self {
        Self {
            buf: String::new(),
            open_quote,
            close_quote,
            policy,
        }
    }

    fn pad(&mut self) {
        if let Some(last) = self.buf.chars().last() {
            if last != ' ' && last != '(' && last != '\n' {
                self.buf.push(' ');
            }
        }
    }

    /// Appends a keyword (or any bare token) with spacing.
    pub fn kw(&mut self, keyword: &str) -> &mut Self {
        self.pad();
        self.buf.push_str(keyword);
        self
    }

    /// Appends an identifier, quoted per policy.
    pub fn ident(&mut self, name: &str) -> &mut Self {
        self.pad();
        let quoted = self.quoted(name);
        self.buf.push_str(&quoted);
        self
    }

    /// Appends a schema-qualified identifier.
    pub fn qualified(&mut self, schema: Option<&str>, name: &str) -> &mut Self {
        self.pad();
        if let Some(schema) = schema {
            let quoted = self.quoted(schema);
            self.buf.push_str(&quoted);
            self.buf.push('.');
        }
        let quoted = self.quoted(name);
        self.buf.push_str(&quoted);
        self
    }

    /// Appends a comma-separated identifier list.
    pub fn ident_list(&mut self, names: &[String]) -> &mut Self {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
                let quoted = self.quoted(name);
                self.buf.push_str(&quoted);
            } else {
                self.ident(name);
            }
        }
        self
    }

    /// Appends raw text with spacing.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.pad();
        self.buf.push_str(text);
        self
    }

    /// Appends raw text without spacing.
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Opens a parenthesized group.
    pub fn lparen(&mut self) -> &mut Self {
        self.pad();
        self.buf.push('(');
        self
    }

    /// Closes a parenthesized group.
    pub fn rparen(&mut self) -> &mut Self {
        self.buf.push(')');
        self
    }

    /// Quotes a single identifier per the writer's policy.
    #[must_use]
    pub fn quoted(&self, name: &str) -> String {
        let quote = match self.policy {
            QuotePolicy::Always => true,
            QuotePolicy::Never => false,
            QuotePolicy::AsNeeded => Self::needs_quote(name),
        };
        if quote {
            format!("{}{}{}", self.open_quote, name, self.close_quote)
        } else {
            String::from(name)
        }
    }

    /// Whether an identifier survives unquoted: lowercase
    /// alphanumerics and underscores, not starting with a digit.
    #[must_use]
    pub fn needs_quote(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c == '_' => {}
            _ => return true,
        }
        !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    /// The assembled text so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer, returning the assembled text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}
