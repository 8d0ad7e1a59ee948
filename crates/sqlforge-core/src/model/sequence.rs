//! Sequence definitions.

use serde::{Deserialize, Serialize};

/// A sequence generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence name.
    pub name: String,
    /// Starting value.
    pub start: i64,
    /// Increment step.
    pub increment: i64,
    /// Minimum value, if bounded.
    pub min_value: Option<i64>,
    /// Maximum value, if bounded.
    pub max_value: Option<i64>,
    /// Cache size, if specified.
    pub cache: Option<u32>,
    /// Whether the sequence wraps around.
    pub cycle: bool,
}

impl Sequence {
    /// Creates a sequence starting at 1 with increment 1.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: 1,
            increment: 1,
            min_value: None,
            max_value: None,
            cache: None,
            cycle: false,
        }
    }

    /// Sets the starting value.
    #[must_use]
    pub const fn start_with(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Sets the increment step.
    #[must_use]
    pub const fn increment_by(mut self, increment: i64) -> Self {
        self.increment = increment;
        self
    }

    /// Sets the cache size.
    #[must_use]
    pub const fn cached(mut self, cache: u32) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Makes the sequence cycle when exhausted.
    #[must_use]
    pub const fn cycling(mut self) -> Self {
        self.cycle = true;
        self
    }
}
