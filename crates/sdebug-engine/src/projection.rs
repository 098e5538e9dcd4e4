//! Projections and the snapshots fetched for them.

use serde::{Deserialize, Serialize};

use sdebug_core::errors::SdebugError;
use sdebug_core::model::{ComponentNode, LogEntry, StateEntry};

/// Glob selecting every state value
pub const ALL_STATE: &str = "**";

/// One independent view of simulation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Log,
    State,
    Tree,
    Map,
}

impl Projection {
    pub const ALL: [Projection; 4] = [
        Projection::Log,
        Projection::State,
        Projection::Tree,
        Projection::Map,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Projection::Log => "log",
            Projection::State => "state",
            Projection::Tree => "tree",
            Projection::Map => "map",
        }
    }

    /// Position in [`Projection::ALL`]
    pub(crate) fn index(&self) -> usize {
        match self {
            Projection::Log => 0,
            Projection::State => 1,
            Projection::Tree => 2,
            Projection::Map => 3,
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Projection {
    type Err = SdebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projection::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| SdebugError::InvalidInput {
                reason: format!("Unknown projection '{}' (expected log, state, tree, or map)", s),
            })
    }
}

/// What to ask the backend for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchRequest {
    /// Log entries, only those strictly after `after` when set
    Log { after: Option<f64> },
    /// State values whose path matches `glob`
    State { glob: String },
    /// The component tree
    Components,
    /// Every `display-*` state value
    Display,
}

impl FetchRequest {
    /// Projection a response to this request feeds
    pub fn projection(&self) -> Projection {
        match self {
            FetchRequest::Log { .. } => Projection::Log,
            FetchRequest::State { .. } => Projection::State,
            FetchRequest::Components => Projection::Tree,
            FetchRequest::Display => Projection::Map,
        }
    }
}

/// A decoded backend response for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Snapshot {
    Log(Vec<LogEntry>),
    State(Vec<StateEntry>),
    Tree(ComponentNode),
    Map(Vec<StateEntry>),
}

impl Snapshot {
    pub fn projection(&self) -> Projection {
        match self {
            Snapshot::Log(_) => Projection::Log,
            Snapshot::State(_) => Projection::State,
            Snapshot::Tree(_) => Projection::Tree,
            Snapshot::Map(_) => Projection::Map,
        }
    }

    /// Number of rows (or tree nodes)
    pub fn len(&self) -> usize {
        match self {
            Snapshot::Log(entries) => entries.len(),
            Snapshot::State(entries) | Snapshot::Map(entries) => entries.len(),
            Snapshot::Tree(root) => root.node_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
