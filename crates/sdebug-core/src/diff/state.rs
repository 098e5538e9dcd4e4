//! Key/value projection diff.

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::{EntryStatus, StateDiff, StateRow};
use crate::errors::{Result, SdebugError};
use crate::filter::StateFilter;
use crate::model::StateEntry;

/// Sort a fetched snapshot by path and reject duplicate paths
///
/// The backend sends rows sorted; sorting here makes the positional compare
/// safe when it doesn't.
///
/// # Errors
///
/// Returns `DuplicateStatePath` when two rows share a path.
pub fn normalize_state(mut entries: Vec<StateEntry>) -> Result<Vec<StateEntry>> {
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].path == pair[1].path) {
        return Err(SdebugError::DuplicateStatePath {
            path: pair[0].path.clone(),
        });
    }
    Ok(entries)
}

/// Count plus positional comparison of the rows passing `include`
///
/// Both snapshots must already be sorted by path.
pub fn state_has_changed<F>(previous: &[StateEntry], current: &[StateEntry], include: F) -> bool
where
    F: Fn(&str) -> bool,
{
    let old: Vec<&StateEntry> = previous.iter().filter(|e| include(&e.path)).collect();
    let new: Vec<&StateEntry> = current.iter().filter(|e| include(&e.path)).collect();

    if old.len() != new.len() {
        return true;
    }
    old.iter()
        .zip(new.iter())
        .any(|(a, b)| a.path != b.path || a.value != b.value)
}

/// Classify every visible row of `current` against `previous`
///
/// Rows of `current` come first, in order, as added/changed/unchanged;
/// visible paths that disappeared follow as removed with their old value.
pub fn classify_state(
    previous: &[StateEntry],
    current: &[StateEntry],
    filter: &StateFilter,
) -> StateDiff {
    let old_values: BTreeMap<&str, &StateEntry> =
        previous.iter().map(|e| (e.path.as_str(), e)).collect();
    let new_paths: BTreeSet<&str> = current.iter().map(|e| e.path.as_str()).collect();

    let mut rows: Vec<StateRow> = current
        .iter()
        .filter(|e| filter.includes(&e.path))
        .map(|e| {
            let status = match old_values.get(e.path.as_str()) {
                None => EntryStatus::Added,
                Some(old) if old.value != e.value => EntryStatus::Changed,
                Some(_) => EntryStatus::Unchanged,
            };
            StateRow {
                entry: e.clone(),
                status,
            }
        })
        .collect();

    rows.extend(
        previous
            .iter()
            .filter(|e| !new_paths.contains(e.path.as_str()) && filter.includes(&e.path))
            .map(|e| StateRow {
                entry: e.clone(),
                status: EntryStatus::Removed,
            }),
    );

    StateDiff { rows }
}

/// Diff two sorted key/value snapshots under `filter`
///
/// Returns `None` when the visible rows are identical.
pub fn diff_state(
    previous: &[StateEntry],
    current: &[StateEntry],
    filter: &StateFilter,
) -> Option<StateDiff> {
    if !state_has_changed(previous, current, |path| filter.includes(path)) {
        return None;
    }
    let diff = classify_state(previous, current, filter);
    tracing::debug!(
        added = diff.count(EntryStatus::Added),
        changed = diff.count(EntryStatus::Changed),
        removed = diff.count(EntryStatus::Removed),
        "state snapshot changed"
    );
    Some(diff)
}
