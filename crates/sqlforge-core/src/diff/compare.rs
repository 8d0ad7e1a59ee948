//! Snapshot comparison: builds difference trees from two versions of
//! a schema.
//!
//! Objects are matched by name; a matched pair that differs becomes a
//! `Modified` node with per-property labels, unmatched objects become
//! `Added`/`Deleted` nodes. Comparing an object against itself yields
//! nothing. Renames cannot be inferred here — express them by
//! constructing [`Diff::renamed`](super::Diff::renamed) nodes
//! directly.

use std::collections::BTreeSet;

use crate::model::{Catalog, Column, Schema, Table};

use super::node::{CatalogDiff, SchemaDiff, TableDiff};
use super::{label, ChangeState, Diff};

/// Diffs two same-named collections by name, producing
/// Added/Modified/Deleted leaf nodes. Modified nodes carry the
/// whole-definition label.
fn diff_named<T, F>(original: &[T], target: &[T], name_of: F) -> Vec<Diff<T>>
where
    T: Clone + PartialEq,
    F: Fn(&T) -> &str,
{
    let original_names: BTreeSet<&str> = original.iter().map(&name_of).collect();
    let target_names: BTreeSet<&str> = target.iter().map(&name_of).collect();

    let mut out = Vec::new();
    for name in original_names.difference(&target_names) {
        let obj = original.iter().find(|o| name_of(o) == *name);
        if let Some(obj) = obj {
            out.push(Diff::deleted(obj.clone()));
        }
    }
    for name in target_names.intersection(&original_names) {
        let orig = original.iter().find(|o| name_of(o) == *name);
        let tgt = target.iter().find(|t| name_of(t) == *name);
        if let (Some(orig), Some(tgt)) = (orig, tgt) {
            if orig != tgt {
                out.push(Diff::modified(orig.clone(), tgt.clone()).with_changed(label::DEFINITION));
            }
        }
    }
    for name in target_names.difference(&original_names) {
        let obj = target.iter().find(|t| name_of(t) == *name);
        if let Some(obj) = obj {
            out.push(Diff::added(obj.clone()));
        }
    }
    out
}

/// Compares two same-named columns property by property.
/// Ordinal position is deliberately ignored: column reordering is not
/// expressible as an ALTER on most engines.
fn diff_column(original: &Column, target: &Column) -> Option<Diff<Column>> {
    let mut diff = Diff::modified(original.clone(), target.clone());
    if original.data_type != target.data_type {
        diff = diff.with_changed(label::DATA_TYPE);
    }
    if original.nullable != target.nullable {
        diff = diff.with_changed(label::NULLABLE);
    }
    if original.default != target.default {
        diff = diff.with_changed(label::DEFAULT);
    }
    if original.identity != target.identity || original.sequence_name != target.sequence_name {
        diff = diff.with_changed(label::IDENTITY);
    }
    if original.formula != target.formula {
        diff = diff.with_changed(label::FORMULA);
    }
    if diff.changed().is_empty() {
        None
    } else {
        Some(diff)
    }
}

/// Compares two versions of a table. Returns `None` when nothing
/// differs.
#[must_use]
pub fn diff_tables(original: &Table, target: &Table) -> Option<TableDiff> {
    let mut diff = TableDiff::modified(original.clone(), target.clone());
    if original.name != target.name {
        diff = diff.with_changed(label::NAME);
    }
    if original.partitioning != target.partitioning {
        diff = diff.with_changed(label::PARTITIONING);
    }

    let original_cols: BTreeSet<&str> = original.columns.iter().map(|c| c.name.as_str()).collect();
    let target_cols: BTreeSet<&str> = target.columns.iter().map(|c| c.name.as_str()).collect();

    for name in original_cols.difference(&target_cols) {
        if let Some(col) = original.find_column(name) {
            diff = diff.with_column(Diff::deleted(col.clone()));
        }
    }
    for name in original_cols.intersection(&target_cols) {
        if let (Some(orig), Some(tgt)) = (original.find_column(name), target.find_column(name)) {
            if let Some(col_diff) = diff_column(orig, tgt) {
                diff = diff.with_column(col_diff);
            }
        }
    }
    for name in target_cols.difference(&original_cols) {
        if let Some(col) = target.find_column(name) {
            diff = diff.with_column(Diff::added(col.clone()));
        }
    }

    for c in diff_named(&original.constraints, &target.constraints, |c| c.name()) {
        diff = diff.with_constraint(c);
    }
    for i in diff_named(&original.indexes, &target.indexes, |i| i.name.as_str()) {
        diff = diff.with_index(i);
    }

    if diff.changed().is_empty() && !diff.has_member_changes() {
        None
    } else {
        Some(diff)
    }
}

/// Compares two versions of a schema. Returns `None` when nothing
/// differs.
#[must_use]
pub fn diff_schemas(original: &Schema, target: &Schema) -> Option<SchemaDiff> {
    let mut diff = SchemaDiff::modified(original.clone(), target.clone());
    if original.character_set != target.character_set {
        diff = diff.with_changed(label::CHARACTER_SET);
    }
    if original.collation != target.collation {
        diff = diff.with_changed(label::COLLATION);
    }

    let original_tables: BTreeSet<&str> = original.tables.iter().map(|t| t.name.as_str()).collect();
    let target_tables: BTreeSet<&str> = target.tables.iter().map(|t| t.name.as_str()).collect();

    for name in original_tables.difference(&target_tables) {
        if let Some(t) = original.find_table(name) {
            diff = diff.with_table(TableDiff::deleted(t.clone()));
        }
    }
    for name in original_tables.intersection(&target_tables) {
        if let (Some(orig), Some(tgt)) = (original.find_table(name), target.find_table(name)) {
            if let Some(table_diff) = diff_tables(orig, tgt) {
                diff = diff.with_table(table_diff);
            }
        }
    }
    for name in target_tables.difference(&original_tables) {
        if let Some(t) = target.find_table(name) {
            diff = diff.with_table(TableDiff::added(t.clone()));
        }
    }

    diff.sequences = diff_named(&original.sequences, &target.sequences, |s| s.name.as_str());
    diff.domains = diff_named(&original.domains, &target.domains, |d| d.name.as_str());
    diff.functions = diff_named(&original.functions, &target.functions, |f| f.name.as_str());
    diff.procedures = diff_named(&original.procedures, &target.procedures, |p| p.name.as_str());
    diff.views = diff_named(&original.views, &target.views, |v| v.name.as_str());
    diff.triggers = diff_named(&original.triggers, &target.triggers, |t| t.name.as_str());

    if diff.changed().is_empty() && !diff.has_member_changes() {
        None
    } else {
        Some(diff)
    }
}

/// Compares two versions of a catalog. Returns `None` when nothing
/// differs.
#[must_use]
pub fn diff_catalogs(original: &Catalog, target: &Catalog) -> Option<CatalogDiff> {
    let mut diff = CatalogDiff::modified(original.clone(), target.clone());

    diff.tablespaces = diff_named(&original.tablespaces, &target.tablespaces, |t| {
        t.name.as_str()
    });
    diff.roles = diff_named(&original.roles, &target.roles, |r| r.name.as_str());
    diff.privileges = diff_named(&original.privileges, &target.privileges, |p| {
        p.on_object.as_str()
    });

    let original_schemas: BTreeSet<&str> =
        original.schemas.iter().map(|s| s.name.as_str()).collect();
    let target_schemas: BTreeSet<&str> = target.schemas.iter().map(|s| s.name.as_str()).collect();

    for name in original_schemas.difference(&target_schemas) {
        if let Some(s) = original.schemas.iter().find(|s| s.name == *name) {
            diff.schemas.push(SchemaDiff::deleted(s.clone()));
        }
    }
    for name in original_schemas.intersection(&target_schemas) {
        let orig = original.schemas.iter().find(|s| s.name == *name);
        let tgt = target.schemas.iter().find(|s| s.name == *name);
        if let (Some(orig), Some(tgt)) = (orig, tgt) {
            if let Some(schema_diff) = diff_schemas(orig, tgt) {
                diff.schemas.push(schema_diff);
            }
        }
    }
    for name in target_schemas.difference(&original_schemas) {
        if let Some(s) = target.schemas.iter().find(|s| s.name == *name) {
            diff.schemas.push(SchemaDiff::added(s.clone()));
        }
    }

    if diff.has_member_changes() {
        Some(diff)
    } else {
        None
    }
}

/// Convenience: wraps matched states into an iterator filter.
pub(crate) fn by_state<T>(diffs: &[Diff<T>], state: ChangeState) -> impl Iterator<Item = &Diff<T>> {
    diffs.iter().filter(move |d| d.state() == state)
}
