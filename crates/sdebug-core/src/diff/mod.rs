//! Projection diff engines.
//!
//! One pure, synchronous engine per projection. Each takes the previously
//! accepted snapshot, a freshly fetched one, and the view filter, and returns
//! `Some(diff)` only when the visible view changed.
//!
//! ## Entry points
//!
//! ```
//! use sdebug_core::diff::{diff_state, render_human_summary, ProjectionDiff};
//! use sdebug_core::filter::StateFilter;
//! use sdebug_core::model::StateEntry;
//!
//! let prev = vec![StateEntry::new("a.x", 1), StateEntry::new("a.y", 2)];
//! let new = vec![StateEntry::new("a.x", 1), StateEntry::new("a.z", 3)];
//! let diff = diff_state(&prev, &new, &StateFilter::default()).unwrap();
//! assert_eq!(
//!     render_human_summary(&ProjectionDiff::State(diff)),
//!     "state: 1 added, 1 removed"
//! );
//! ```
//!
//! ## Guarantees
//!
//! - **Idempotence**: a snapshot diffed against itself never reports a change.
//! - **Completeness**: every visible key/value path of either side is
//!   classified exactly once.
//! - **Ordering**: key/value and map snapshots are compared positionally in
//!   path order; trees are compared order-insensitively.

pub mod human_summary;
pub mod log;
pub mod map;
pub mod model;
pub mod state;
pub mod tree;

pub use human_summary::render_human_summary;
pub use log::{diff_log, log_has_changed};
pub use map::{diff_map, group_display, map_has_changed};
pub use model::{
    EntryStatus, LogDiff, MapDiff, ProjectionDiff, StateDiff, StateRow, TreeDiff,
};
pub use state::{classify_state, diff_state, normalize_state, state_has_changed};
pub use tree::{diff_tree, flatten, outline, tree_has_changed, validate_tree};
