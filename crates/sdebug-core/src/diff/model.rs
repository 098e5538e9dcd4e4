//! Projection diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! A diff value only exists for a changed projection; "no change" is
//! represented by its absence.

use serde::{Deserialize, Serialize};

use crate::model::{ComponentNode, LogEntry, MapLayout, StateEntry};

/// The diff emitted for one changed projection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "projection", rename_all = "lowercase")]
pub enum ProjectionDiff {
    Log(LogDiff),
    State(StateDiff),
    Tree(TreeDiff),
    Map(MapDiff),
}

impl ProjectionDiff {
    /// Projection name as used in logs and errors
    pub fn projection_name(&self) -> &'static str {
        match self {
            ProjectionDiff::Log(_) => "log",
            ProjectionDiff::State(_) => "state",
            ProjectionDiff::Tree(_) => "tree",
            ProjectionDiff::Map(_) => "map",
        }
    }

    /// Number of rows/entries/nodes carried by the diff
    pub fn len(&self) -> usize {
        match self {
            ProjectionDiff::Log(d) => d.entries.len(),
            ProjectionDiff::State(d) => d.rows.len(),
            ProjectionDiff::Tree(d) => d.tree.node_count(),
            ProjectionDiff::Map(d) => d.layout.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Newly visible log entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogDiff {
    /// Entries past the previous watermark, in time order
    pub entries: Vec<LogEntry>,
    /// Watermark after accepting `entries`
    pub watermark: Option<f64>,
}

/// Classification of one key/value row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Added,
    Changed,
    Unchanged,
    Removed,
}

/// One classified key/value row
///
/// A removed row carries the previous value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateRow {
    pub entry: StateEntry,
    pub status: EntryStatus,
}

/// Classified key/value view
///
/// Rows follow the new snapshot's order, with removed rows appended after.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StateDiff {
    pub rows: Vec<StateRow>,
}

impl StateDiff {
    /// Rows with the given status, in row order
    pub fn with_status(&self, status: EntryStatus) -> impl Iterator<Item = &StateEntry> {
        self.rows
            .iter()
            .filter(move |row| row.status == status)
            .map(|row| &row.entry)
    }

    pub fn added(&self) -> Vec<&StateEntry> {
        self.with_status(EntryStatus::Added).collect()
    }

    pub fn changed(&self) -> Vec<&StateEntry> {
        self.with_status(EntryStatus::Changed).collect()
    }

    pub fn unchanged(&self) -> Vec<&StateEntry> {
        self.with_status(EntryStatus::Unchanged).collect()
    }

    pub fn removed(&self) -> Vec<&StateEntry> {
        self.with_status(EntryStatus::Removed).collect()
    }

    /// Count of rows with the given status
    pub fn count(&self, status: EntryStatus) -> usize {
        self.with_status(status).count()
    }
}

/// New component tree
///
/// The tree is unfiltered; renderers re-apply the scope in tree order
/// (see [`crate::diff::tree::outline`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeDiff {
    pub tree: ComponentNode,
}

/// New map layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapDiff {
    pub layout: MapLayout,
}
