//! Schema definitions.

use serde::{Deserialize, Serialize};

use super::routine::{Domain, Function, Procedure};
use super::sequence::Sequence;
use super::table::Table;
use super::trigger::Trigger;
use super::view::View;

/// A schema: a namespace of database objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name.
    pub name: String,
    /// Default character set, if declared.
    pub character_set: Option<String>,
    /// Default collation, if declared.
    pub collation: Option<String>,
    /// Sequences.
    pub sequences: Vec<Sequence>,
    /// Domains.
    pub domains: Vec<Domain>,
    /// Functions.
    pub functions: Vec<Function>,
    /// Procedures.
    pub procedures: Vec<Procedure>,
    /// Tables.
    pub tables: Vec<Table>,
    /// Views.
    pub views: Vec<View>,
    /// Triggers.
    pub triggers: Vec<Trigger>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            character_set: None,
            collation: None,
            sequences: Vec::new(),
            domains: Vec::new(),
            functions: Vec::new(),
            procedures: Vec::new(),
            tables: Vec::new(),
            views: Vec::new(),
            triggers: Vec::new(),
        }
    }

    /// Sets the default character set.
    #[must_use]
    pub fn with_character_set(mut self, character_set: impl Into<String>) -> Self {
        self.character_set = Some(character_set.into());
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn with_collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Adds a table, qualifying it with this schema's name.
    #[must_use]
    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table.in_schema(self.name.clone()));
        self
    }

    /// Adds a sequence.
    #[must_use]
    pub fn sequence(mut self, sequence: Sequence) -> Self {
        self.sequences.push(sequence);
        self
    }

    /// Adds a view.
    #[must_use]
    pub fn view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    /// Adds a trigger.
    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Adds a domain.
    #[must_use]
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domains.push(domain);
        self
    }

    /// Adds a function.
    #[must_use]
    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    /// Adds a procedure.
    #[must_use]
    pub fn procedure(mut self, procedure: Procedure) -> Self {
        self.procedures.push(procedure);
        self
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
