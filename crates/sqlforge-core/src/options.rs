//! Generation policy.
//!
//! An [`Options`] value controls quoting, guards, and table-level
//! behavior (column-role predicates, DML batch size, lock mode).
//! Options are immutable in use: every setter consumes `self`, so a
//! value handed to a generation call is never mutated underneath it
//! and can be shared across concurrent runs freely.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::model::{Column, Table};

/// Identifier quoting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotePolicy {
    /// Quote every identifier.
    Always,
    /// Quote only identifiers that need it (default).
    #[default]
    AsNeeded,
    /// Never quote.
    Never,
}

/// Table lock mode for LOCK statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// Shared lock.
    Share,
    /// Exclusive lock (default).
    #[default]
    Exclusive,
}

impl LockMode {
    /// Returns the SQL keyword for the mode.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Share => "SHARE",
            Self::Exclusive => "EXCLUSIVE",
        }
    }
}

/// A predicate identifying columns playing a given role.
pub type ColumnPredicate = Arc<dyn Fn(&Table, &Column) -> bool + Send + Sync>;

fn name_matches(pattern: &str) -> ColumnPredicate {
    let re = Regex::new(pattern).unwrap_or_else(|_| unreachable!("built-in pattern is valid"));
    Arc::new(move |_: &Table, c: &Column| re.is_match(&c.name))
}

/// Table-level generation policy.
#[derive(Clone)]
pub struct TableOptions {
    /// Rows per generated multi-row DML statement.
    pub dml_batch_size: usize,
    /// Lock mode for LOCK statements.
    pub lock_mode: LockMode,
    /// Prefix for temporary table names.
    pub temp_table_prefix: String,
    /// Wrap nullable numeric values in COALESCE on INSERT.
    pub coalesce_on_insert: bool,
    /// Wrap nullable numeric values in COALESCE on UPDATE.
    pub coalesce_on_update: bool,
    /// Refresh updated-at columns on UPDATE.
    pub update_updated_at: bool,
    /// Identifies auto-increment columns.
    pub auto_increment: ColumnPredicate,
    /// Identifies created-at columns.
    pub created_at: ColumnPredicate,
    /// Identifies updated-at columns.
    pub updated_at: ColumnPredicate,
    /// Identifies optimistic-lock version columns.
    pub optimistic_lock: ColumnPredicate,
    /// Columns eligible for generated INSERTs.
    pub insertable: ColumnPredicate,
    /// Columns eligible for generated UPDATEs.
    pub updatable: ColumnPredicate,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            dml_batch_size: 50,
            lock_mode: LockMode::default(),
            temp_table_prefix: String::from("tmp_"),
            coalesce_on_insert: false,
            coalesce_on_update: false,
            update_updated_at: true,
            auto_increment: Arc::new(|_, c| c.identity),
            created_at: name_matches(r"(?i)^created?_at$"),
            updated_at: name_matches(r"(?i)^(updated?_at|modified_at)$"),
            optimistic_lock: name_matches(r"(?i)^(lock_version|version_no|row_version)$"),
            insertable: Arc::new(|_, c| c.formula.is_none()),
            updatable: Arc::new(|_, c| c.formula.is_none()),
        }
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("dml_batch_size", &self.dml_batch_size)
            .field("lock_mode", &self.lock_mode)
            .field("temp_table_prefix", &self.temp_table_prefix)
            .field("coalesce_on_insert", &self.coalesce_on_insert)
            .field("coalesce_on_update", &self.coalesce_on_update)
            .field("update_updated_at", &self.update_updated_at)
            .finish_non_exhaustive()
    }
}

/// Generation policy handed to every builder.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Identifier quoting policy.
    pub quote: QuotePolicy,
    /// Qualify object names with their schema name.
    pub decorate_schema_name: bool,
    /// Emit IF EXISTS on DROP statements (where supported).
    pub drop_if_exists: bool,
    /// Emit CASCADE on DROP statements (where supported).
    pub drop_cascade: bool,
    /// Emit IF NOT EXISTS on CREATE statements (where supported).
    pub create_if_not_exists: bool,
    /// Prepend a SET search_path statement to schema alterations
    /// (where supported).
    pub set_search_path: bool,
    /// Table-level policy.
    pub table: TableOptions,
}

impl Options {
    /// Creates the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quoting policy.
    #[must_use]
    pub const fn quoting(mut self, quote: QuotePolicy) -> Self {
        self.quote = quote;
        self
    }

    /// Qualifies object names with their schema name.
    #[must_use]
    pub const fn with_schema_decoration(mut self) -> Self {
        self.decorate_schema_name = true;
        self
    }

    /// Emits IF EXISTS / IF NOT EXISTS guards.
    #[must_use]
    pub const fn with_guards(mut self) -> Self {
        self.drop_if_exists = true;
        self.create_if_not_exists = true;
        self
    }

    /// Emits CASCADE on DROP statements where the dialect allows it.
    #[must_use]
    pub const fn with_drop_cascade(mut self) -> Self {
        self.drop_cascade = true;
        self
    }

    /// Prepends SET search_path to schema alterations where the
    /// dialect allows it.
    #[must_use]
    pub const fn with_search_path(mut self) -> Self {
        self.set_search_path = true;
        self
    }

    /// Sets the DML batch size.
    #[must_use]
    pub fn dml_batch_size(mut self, size: usize) -> Self {
        self.table.dml_batch_size = size.max(1);
        self
    }

    /// Replaces the optimistic-lock column predicate.
    #[must_use]
    pub fn optimistic_lock_columns(mut self, predicate: ColumnPredicate) -> Self {
        self.table.optimistic_lock = predicate;
        self
    }
}
