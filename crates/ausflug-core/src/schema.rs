//! Schema discovery over heterogeneous record collections.
//!
//! The attribute set is not fixed at compile time: columns and
//! categorical filter values are discovered from whatever keys the
//! records happen to carry.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::record::{Record, LATITUDE_ATTR, LONGITUDE_ATTR};

/// Union of the key sets of every record, in first-seen order. A
/// record with keys not seen elsewhere contributes new columns at the
/// point of first occurrence.
pub fn discover_columns(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.to_string()) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// Distinct non-empty string-coerced values of an attribute, in
/// ascending lexical order. Used to build categorical filter choices.
pub fn categorical_values(records: &[Record], attribute: &str) -> Vec<String> {
    let distinct: BTreeSet<String> = records
        .iter()
        .map(|r| r.coerced_text(attribute))
        .filter(|v| !v.is_empty())
        .collect();
    distinct.into_iter().collect()
}

/// Per-column visibility for table rendering.
///
/// Seeded exactly once, from the first non-empty discovery; later
/// discoveries never re-seed, so columns first seen afterwards have no
/// default and stay hidden until toggled. This mirrors the one-shot
/// initialization the views rely on.
#[derive(Debug, Clone, Default)]
pub struct ColumnVisibility {
    visible: HashMap<String, bool>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether defaults have been seeded yet.
    pub fn is_seeded(&self) -> bool {
        !self.visible.is_empty()
    }

    /// Seed defaults: everything visible except the coordinate
    /// columns. A no-op once seeded or when `columns` is empty.
    pub fn seed(&mut self, columns: &[String]) {
        if self.is_seeded() || columns.is_empty() {
            return;
        }
        for column in columns {
            let visible = column != LATITUDE_ATTR && column != LONGITUDE_ATTR;
            self.visible.insert(column.clone(), visible);
        }
    }

    /// Columns without an entry are hidden.
    pub fn is_visible(&self, column: &str) -> bool {
        self.visible.get(column).copied().unwrap_or(false)
    }

    pub fn set(&mut self, column: &str, visible: bool) {
        self.visible.insert(column.to_string(), visible);
    }

    pub fn toggle(&mut self, column: &str) {
        let next = !self.is_visible(column);
        self.visible.insert(column.to_string(), next);
    }
}
