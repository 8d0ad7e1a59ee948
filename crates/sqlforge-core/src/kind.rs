//! The statement kind taxonomy.
//!
//! A closed enumeration of the SQL operation kinds the engine can
//! emit, each carrying static metadata: its category (DDL/DML/...),
//! the change state it corresponds to, its inverse, an optional
//! decomposition into surrogate kinds, and the table ordering a batch
//! of that kind requires. Metadata lives in `match` tables on the
//! enum, not in per-instance state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diff::ChangeState;
use crate::model::Table;

/// The SQL category of a statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlCategory {
    /// Data definition.
    Ddl,
    /// Data manipulation.
    Dml,
    /// Data control (grants).
    Dcl,
    /// Transaction/session control.
    Tcl,
    /// A comment line, no terminator.
    Comment,
    /// An empty line, formatting only.
    EmptyLine,
}

/// How a batch of tables must be ordered for a statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOrder {
    /// Dependency order: referenced tables before referencing ones.
    Create,
    /// Reverse dependency order: referencing tables first.
    Drop,
}

/// The kind of SQL statement a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementKind {
    /// CREATE an object.
    Create,
    /// ALTER an object in place.
    Alter,
    /// DROP an object.
    Drop,
    /// TRUNCATE a table.
    Truncate,
    /// LOCK a table.
    Lock,
    /// GRANT privileges.
    Grant,
    /// REVOKE privileges.
    Revoke,
    /// Table-level INSERT ... SELECT.
    InsertSelect,
    /// Row-level INSERT.
    InsertRow,
    /// Row-level INSERT ... SELECT ... WHERE NOT EXISTS.
    InsertSelectRow,
    /// Table-level UPDATE.
    Update,
    /// Row-level UPDATE keyed by primary key.
    UpdateRowByPk,
    /// Table-level DELETE.
    Delete,
    /// Row-level DELETE keyed by primary key.
    DeleteRowByPk,
    /// Table-level MERGE (composite by default).
    Merge,
    /// Row-level MERGE (composite by default).
    MergeRow,
    /// SET search_path session statement.
    SetSearchPath,
    /// A comment line.
    Comment,
    /// An empty line.
    EmptyLine,
}

impl StatementKind {
    /// The SQL category of this kind.
    #[must_use]
    pub const fn category(self) -> SqlCategory {
        match self {
            Self::Create | Self::Alter | Self::Drop | Self::Truncate => SqlCategory::Ddl,
            Self::InsertSelect
            | Self::InsertRow
            | Self::InsertSelectRow
            | Self::Update
            | Self::UpdateRowByPk
            | Self::Delete
            | Self::DeleteRowByPk
            | Self::Merge
            | Self::MergeRow => SqlCategory::Dml,
            Self::Grant | Self::Revoke => SqlCategory::Dcl,
            Self::Lock | Self::SetSearchPath => SqlCategory::Tcl,
            Self::Comment => SqlCategory::Comment,
            Self::EmptyLine => SqlCategory::EmptyLine,
        }
    }

    /// The change state this kind expresses, if any.
    #[must_use]
    pub const fn change_state(self) -> Option<ChangeState> {
        match self {
            Self::Create
            | Self::Grant
            | Self::InsertRow
            | Self::InsertSelect
            | Self::InsertSelectRow => Some(ChangeState::Added),
            Self::Alter | Self::Update | Self::UpdateRowByPk | Self::Merge | Self::MergeRow => {
                Some(ChangeState::Modified)
            }
            Self::Drop | Self::Revoke | Self::Delete | Self::DeleteRowByPk | Self::Truncate => {
                Some(ChangeState::Deleted)
            }
            _ => None,
        }
    }

    /// The inverse kind. Identity for unpaired kinds;
    /// `k.reverse().reverse() == k` for every kind.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Create => Self::Drop,
            Self::Drop => Self::Create,
            Self::InsertRow => Self::DeleteRowByPk,
            Self::DeleteRowByPk => Self::InsertRow,
            Self::InsertSelect => Self::Delete,
            Self::Delete => Self::InsertSelect,
            Self::Grant => Self::Revoke,
            Self::Revoke => Self::Grant,
            other => other,
        }
    }

    /// Surrogate kinds this kind decomposes into when no concrete
    /// builder is registered for it. Empty for non-composite kinds.
    #[must_use]
    pub const fn surrogates(self) -> &'static [Self] {
        match self {
            Self::Alter => &[Self::Drop, Self::Create],
            Self::Merge => &[Self::InsertSelect, Self::Update],
            Self::MergeRow => &[Self::InsertSelectRow, Self::UpdateRowByPk],
            _ => &[],
        }
    }

    /// Whether this kind operates at row granularity.
    #[must_use]
    pub const fn supports_row_granularity(self) -> bool {
        matches!(
            self,
            Self::InsertRow | Self::InsertSelectRow | Self::UpdateRowByPk | Self::DeleteRowByPk
                | Self::MergeRow
        )
    }

    /// Whether this kind participates in optimistic locking
    /// (PK-keyed row UPDATE/DELETE only).
    #[must_use]
    pub const fn is_optimistic_lockable(self) -> bool {
        matches!(self, Self::UpdateRowByPk | Self::DeleteRowByPk)
    }

    /// The table ordering a batch of this kind requires, if any.
    #[must_use]
    pub const fn table_order(self) -> Option<TableOrder> {
        match self {
            Self::Create
            | Self::InsertRow
            | Self::InsertSelect
            | Self::InsertSelectRow
            | Self::Merge
            | Self::MergeRow => Some(TableOrder::Create),
            Self::Drop | Self::Delete | Self::DeleteRowByPk | Self::Truncate => {
                Some(TableOrder::Drop)
            }
            _ => None,
        }
    }

    /// All kinds, for exhaustive property checks.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Create,
            Self::Alter,
            Self::Drop,
            Self::Truncate,
            Self::Lock,
            Self::Grant,
            Self::Revoke,
            Self::InsertSelect,
            Self::InsertRow,
            Self::InsertSelectRow,
            Self::Update,
            Self::UpdateRowByPk,
            Self::Delete,
            Self::DeleteRowByPk,
            Self::Merge,
            Self::MergeRow,
            Self::SetSearchPath,
            Self::Comment,
            Self::EmptyLine,
        ]
    }
}

/// Sorts tables into the order required by a statement kind:
/// dependency order for creation, the exact reverse for dropping.
///
/// Deterministic Kahn walk over foreign-key references with a name
/// tiebreak. Tables involved in reference cycles are appended in name
/// order after the acyclic part.
pub fn sort_tables(tables: &mut Vec<Table>, order: TableOrder) {
    let index_by_name: BTreeMap<&str, usize> = tables
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();

    // in_degree[i] = number of distinct tables in the batch that
    // table i references (those must be created first).
    let mut in_degree: Vec<usize> = tables
        .iter()
        .map(|t| {
            t.referenced_tables()
                .iter()
                .filter(|r| index_by_name.contains_key(**r))
                .collect::<std::collections::BTreeSet<_>>()
                .len()
        })
        .collect();

    let mut emitted = vec![false; tables.len()];
    let mut sorted_indexes: Vec<usize> = Vec::with_capacity(tables.len());

    loop {
        // Smallest-named table with no unmet references.
        let next = tables
            .iter()
            .enumerate()
            .filter(|(i, _)| !emitted[*i] && in_degree[*i] == 0)
            .min_by(|(_, a), (_, b)| a.name.cmp(&b.name))
            .map(|(i, _)| i);
        let Some(i) = next else { break };
        emitted[i] = true;
        sorted_indexes.push(i);
        let name = tables[i].name.clone();
        for (j, t) in tables.iter().enumerate() {
            if !emitted[j] && t.referenced_tables().contains(&name.as_str()) {
                in_degree[j] = in_degree[j].saturating_sub(1);
            }
        }
    }

    // Cycles: remaining tables in name order.
    let mut rest: Vec<usize> = (0..tables.len()).filter(|i| !emitted[*i]).collect();
    rest.sort_by(|&a, &b| tables[a].name.cmp(&tables[b].name));
    sorted_indexes.extend(rest);

    if order == TableOrder::Drop {
        sorted_indexes.reverse();
    }

    let mut sorted: Vec<Table> = Vec::with_capacity(tables.len());
    for i in sorted_indexes {
        sorted.push(tables[i].clone());
    }
    *tables = sorted;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Constraint, DataType};

    #[test]
    fn reverse_is_an_involution() {
        for &kind in StatementKind::all() {
            assert_eq!(kind.reverse().reverse(), kind, "{kind:?}");
        }
    }

    #[test]
    fn surrogates_only_on_composite_kinds() {
        for &kind in StatementKind::all() {
            let composite = matches!(
                kind,
                StatementKind::Alter | StatementKind::Merge | StatementKind::MergeRow
            );
            assert_eq!(!kind.surrogates().is_empty(), composite, "{kind:?}");
        }
    }

    #[test]
    fn merge_row_decomposes_into_insert_select_then_update() {
        assert_eq!(
            StatementKind::MergeRow.surrogates(),
            &[
                StatementKind::InsertSelectRow,
                StatementKind::UpdateRowByPk
            ]
        );
    }

    #[test]
    fn categories() {
        assert_eq!(StatementKind::Create.category(), SqlCategory::Ddl);
        assert_eq!(StatementKind::InsertRow.category(), SqlCategory::Dml);
        assert_eq!(StatementKind::Grant.category(), SqlCategory::Dcl);
        assert_eq!(StatementKind::Lock.category(), SqlCategory::Tcl);
        assert_eq!(StatementKind::Comment.category(), SqlCategory::Comment);
        assert_eq!(StatementKind::EmptyLine.category(), SqlCategory::EmptyLine);
    }

    #[test]
    fn optimistic_lockable_is_pk_keyed_only() {
        assert!(StatementKind::UpdateRowByPk.is_optimistic_lockable());
        assert!(StatementKind::DeleteRowByPk.is_optimistic_lockable());
        assert!(!StatementKind::InsertRow.is_optimistic_lockable());
        assert!(!StatementKind::Update.is_optimistic_lockable());
    }

    fn table_with_fk(name: &str, references: &[&str]) -> Table {
        let mut t = Table::new(name).column(Column::new("id", DataType::Bigint));
        for (i, r) in references.iter().enumerate() {
            t = t.constraint(Constraint::foreign_key(
                format!("fk_{name}_{i}"),
                &["id"],
                *r,
                &["id"],
            ));
        }
        t
    }

    #[test]
    fn create_order_puts_referenced_tables_first() {
        // orders -> users, orders -> products
        let mut tables = vec![
            table_with_fk("orders", &["users", "products"]),
            table_with_fk("users", &[]),
            table_with_fk("products", &[]),
        ];
        sort_tables(&mut tables, TableOrder::Create);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["products", "users", "orders"]);
    }

    #[test]
    fn drop_order_is_the_exact_reverse() {
        let mut create = vec![
            table_with_fk("orders", &["users"]),
            table_with_fk("users", &[]),
        ];
        let mut drop = create.clone();
        sort_tables(&mut create, TableOrder::Create);
        sort_tables(&mut drop, TableOrder::Drop);
        let created: Vec<&str> = create.iter().map(|t| t.name.as_str()).collect();
        let mut dropped: Vec<&str> = drop.iter().map(|t| t.name.as_str()).collect();
        dropped.reverse();
        assert_eq!(created, dropped);
    }

    #[test]
    fn cycles_fall_back_to_name_order() {
        let mut tables = vec![
            table_with_fk("b", &["a"]),
            table_with_fk("a", &["b"]),
            table_with_fk("standalone", &[]),
        ];
        sort_tables(&mut tables, TableOrder::Create);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["standalone", "a", "b"]);
    }
}
