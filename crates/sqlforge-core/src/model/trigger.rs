//! Trigger definitions.

use serde::{Deserialize, Serialize};

/// When the trigger fires relative to the triggering statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerTiming {
    /// Before the statement.
    Before,
    /// After the statement.
    After,
    /// Instead of the statement (views).
    InsteadOf,
}

impl TriggerTiming {
    /// Returns the SQL keyword(s) for the timing.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The statement kind a trigger fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// INSERT statements.
    Insert,
    /// UPDATE statements.
    Update,
    /// DELETE statements.
    Delete,
}

impl TriggerEvent {
    /// Returns the SQL keyword for the event.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

/// A trigger on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Trigger name.
    pub name: String,
    /// The table the trigger is attached to.
    pub table: String,
    /// Firing time.
    pub timing: TriggerTiming,
    /// Triggering events.
    pub events: Vec<TriggerEvent>,
    /// Whether the trigger fires per row (vs. per statement).
    pub for_each_row: bool,
    /// Trigger body, emitted verbatim.
    pub body: String,
}

impl Trigger {
    /// Creates a row-level AFTER trigger.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        events: &[TriggerEvent],
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            timing: TriggerTiming::After,
            events: events.to_vec(),
            for_each_row: true,
            body: body.into(),
        }
    }

    /// Sets the firing time.
    #[must_use]
    pub const fn timing(mut self, timing: TriggerTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Makes the trigger statement-level.
    #[must_use]
    pub const fn for_each_statement(mut self) -> Self {
        self.for_each_row = false;
        self
    }
}
