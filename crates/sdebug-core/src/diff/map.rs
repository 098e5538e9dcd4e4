//! Map projection diff and display grouping.

use std::collections::BTreeMap;

use crate::diff::model::MapDiff;
use crate::diff::state::state_has_changed;
use crate::filter::is_display_path;
use crate::model::display::DEFAULT_COLOR;
use crate::model::state::split_path;
use crate::model::{DisplayEntry, MapExtent, MapLayout, StateEntry, StateValue};

const LOCATION_X: &str = "display-location-x";
const LOCATION_Y: &str = "display-location-y";
const NAME: &str = "display-name";
const DETAILS: &str = "display-details";
const COLOR: &str = "display-color";
const TITLE: &str = "display-title";
const SIZE_X: &str = "display-size-x";
const SIZE_Y: &str = "display-size-y";

/// Count plus positional comparison of the `display-*` rows
pub fn map_has_changed(previous: &[StateEntry], current: &[StateEntry]) -> bool {
    state_has_changed(previous, current, is_display_path)
}

/// Diff two sorted display snapshots
///
/// Returns the layout of `current` when any display row changed.
pub fn diff_map(previous: &[StateEntry], current: &[StateEntry]) -> Option<MapDiff> {
    if !map_has_changed(previous, current) {
        return None;
    }
    let layout = group_display(current);
    tracing::debug!(drawable = layout.entries.len(), "display snapshot changed");
    Some(MapDiff { layout })
}

fn text_of(value: &StateValue) -> String {
    value.to_string()
}

/// Build the drawable layout from a display snapshot
///
/// Rows are grouped by owning component. A group needs both coordinates
/// (numeric) and a name to be drawn; incomplete groups are left out. The
/// title and world extent come from the first `display-title` and
/// `display-size-x`/`-y` rows.
pub fn group_display(entries: &[StateEntry]) -> MapLayout {
    let mut groups: BTreeMap<&str, BTreeMap<&str, &StateValue>> = BTreeMap::new();
    let mut title = None;
    let mut width = None;
    let mut height = None;

    for entry in entries.iter().filter(|e| is_display_path(&e.path)) {
        let (owner, key) = split_path(&entry.path);
        match key {
            TITLE if title.is_none() => title = Some(text_of(&entry.value)),
            SIZE_X if width.is_none() => width = entry.value.as_f64(),
            SIZE_Y if height.is_none() => height = entry.value.as_f64(),
            _ => {}
        }
        groups.entry(owner).or_default().insert(key, &entry.value);
    }

    let entries = groups
        .into_iter()
        .filter_map(|(owner, values)| {
            let x = values.get(LOCATION_X)?.as_f64()?;
            let y = values.get(LOCATION_Y)?.as_f64()?;
            let name = text_of(values.get(NAME)?);
            Some(DisplayEntry {
                owner: owner.to_string(),
                x,
                y,
                name,
                details: values.get(DETAILS).map(|v| text_of(v)),
                color: values
                    .get(COLOR)
                    .map(|v| text_of(v))
                    .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            })
        })
        .collect();

    let extent = match (width, height) {
        (Some(width), Some(height)) => Some(MapExtent { width, height }),
        _ => None,
    };

    MapLayout {
        title,
        extent,
        entries,
    }
}
