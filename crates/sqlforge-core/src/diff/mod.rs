//! Difference trees over schema objects.
//!
//! A difference node records the change between an "original" and a
//! "target" version of one object: its [`ChangeState`], the two sides
//! (exactly one may be absent, never both), the labels of changed
//! properties, and — for container objects — collections of child
//! difference nodes.
//!
//! Trees are usually produced by the comparator functions
//! ([`diff_tables`], [`diff_schemas`], [`diff_catalogs`]) but can
//! equally be assembled by hand (e.g. to express a rename, which no
//! snapshot comparison can infer from names alone).

mod compare;
mod node;

pub use compare::{diff_catalogs, diff_schemas, diff_tables};
pub(crate) use compare::by_state;
pub use node::{CatalogDiff, DiffNode, SchemaDiff, TableDiff};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Property labels used in `changed` sets.
pub mod label {
    /// Object name.
    pub const NAME: &str = "name";
    /// Column data type.
    pub const DATA_TYPE: &str = "data_type";
    /// Column nullability.
    pub const NULLABLE: &str = "nullable";
    /// Column default value.
    pub const DEFAULT: &str = "default";
    /// Column identity flag or bound sequence.
    pub const IDENTITY: &str = "identity";
    /// Column formula.
    pub const FORMULA: &str = "formula";
    /// Whole-definition change of a leaf object (constraint, index,
    /// sequence, view, ...).
    pub const DEFINITION: &str = "definition";
    /// Table partitioning.
    pub const PARTITIONING: &str = "partitioning";
    /// Schema character set.
    pub const CHARACTER_SET: &str = "character_set";
    /// Schema collation.
    pub const COLLATION: &str = "collation";
}

/// The direction of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangeState {
    /// Present only in the target.
    Added,
    /// Present on both sides, with differing properties.
    Modified,
    /// Present only in the original.
    Deleted,
}

/// A difference node over one object of type `T`.
///
/// Invariant (enforced by the constructors): `Added` has only a
/// target, `Deleted` only an original, `Modified` both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diff<T> {
    state: ChangeState,
    original: Option<T>,
    target: Option<T>,
    changed: BTreeSet<String>,
}

impl<T> Diff<T> {
    /// A node for an object present only in the target.
    #[must_use]
    pub fn added(target: T) -> Self {
        Self {
            state: ChangeState::Added,
            original: None,
            target: Some(target),
            changed: BTreeSet::new(),
        }
    }

    /// A node for an object present only in the original.
    #[must_use]
    pub fn deleted(original: T) -> Self {
        Self {
            state: ChangeState::Deleted,
            original: Some(original),
            target: None,
            changed: BTreeSet::new(),
        }
    }

    /// A node for an object present on both sides.
    #[must_use]
    pub fn modified(original: T, target: T) -> Self {
        Self {
            state: ChangeState::Modified,
            original: Some(original),
            target: Some(target),
            changed: BTreeSet::new(),
        }
    }

    /// A modification that is purely a rename.
    #[must_use]
    pub fn renamed(original: T, target: T) -> Self {
        Self::modified(original, target).with_changed(label::NAME)
    }

    /// Records a changed-property label.
    #[must_use]
    pub fn with_changed(mut self, property: impl Into<String>) -> Self {
        self.changed.insert(property.into());
        self
    }

    /// The change state.
    #[must_use]
    pub const fn state(&self) -> ChangeState {
        self.state
    }

    /// The original side, absent for `Added`.
    #[must_use]
    pub const fn original(&self) -> Option<&T> {
        self.original.as_ref()
    }

    /// The target side, absent for `Deleted`.
    #[must_use]
    pub const fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Whichever side is present, preferring the target.
    #[must_use]
    pub fn present(&self) -> &T {
        match (&self.target, &self.original) {
            (Some(t), _) => t,
            (None, Some(o)) => o,
            (None, None) => unreachable!("diff node with neither side"),
        }
    }

    /// The changed-property labels. Empty unless `Modified`.
    #[must_use]
    pub const fn changed(&self) -> &BTreeSet<String> {
        &self.changed
    }

    /// Whether the NAME property changed.
    #[must_use]
    pub fn name_changed(&self) -> bool {
        self.changed.contains(label::NAME)
    }

    /// Whether any property other than NAME changed.
    #[must_use]
    pub fn definition_changed(&self) -> bool {
        self.changed.iter().any(|l| l != label::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_keep_the_side_invariant() {
        let added = Diff::added(1);
        assert_eq!(added.state(), ChangeState::Added);
        assert!(added.original().is_none());
        assert_eq!(added.present(), &1);

        let deleted = Diff::deleted(2);
        assert!(deleted.target().is_none());
        assert_eq!(deleted.present(), &2);

        let modified = Diff::modified(1, 2).with_changed(label::DATA_TYPE);
        assert_eq!(modified.present(), &2);
        assert!(modified.definition_changed());
        assert!(!modified.name_changed());
    }

    #[test]
    fn rename_is_a_name_only_change() {
        let d = Diff::renamed("old", "new");
        assert!(d.name_changed());
        assert!(!d.definition_changed());
    }
}
