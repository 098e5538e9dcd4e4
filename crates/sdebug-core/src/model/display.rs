use serde::{Deserialize, Serialize};

/// Colour used when a component has no `display-color` value
pub const DEFAULT_COLOR: &str = "black";

/// A component drawn on the map, assembled from its `display-*` state values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayEntry {
    /// Path of the owning component
    pub owner: String,
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub details: Option<String>,
    pub color: String,
}

/// World size from the `display-size-x` / `display-size-y` values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    pub width: f64,
    pub height: f64,
}

/// Everything a map renderer needs for one accepted display snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapLayout {
    pub title: Option<String>,
    pub extent: Option<MapExtent>,
    /// Drawable components, sorted by owner
    pub entries: Vec<DisplayEntry>,
}

impl MapLayout {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for the given owning component, if drawable
    pub fn entry(&self, owner: &str) -> Option<&DisplayEntry> {
        self.entries.iter().find(|e| e.owner == owner)
    }
}
