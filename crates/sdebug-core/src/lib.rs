//! sdebug core - snapshot model and reconciliation primitives
//!
//! This crate provides the pure, synchronous building blocks of the debugger
//! dashboard, including:
//! - The data model for the four projections (log, key/value state,
//!   component tree, map)
//! - View filter predicates (scope, severity, display values)
//! - The log watermark and the single-slot snapshot store
//! - One diff engine per projection
//! - The error facility and the structured logging facility
//! - Parsing helpers for user-typed durations, levels, paths and values
//!
//! Fetching snapshots and driving poll cycles live in `sdebug-engine`.

pub mod diff;
pub mod errors;
pub mod filter;
pub mod logging_facility;
pub mod model;
pub mod parse;
pub mod store;
pub mod watermark;

// Re-export commonly used types
pub use diff::ProjectionDiff;
pub use errors::{ExError, ExErrorKind, Result, SdebugError};
pub use filter::{LogFilter, Scope, StateFilter, ViewFilter};
pub use model::{ComponentNode, LogEntry, LogLevel, MapLayout, StateEntry, StateValue, ValueKind};
pub use store::SnapshotStore;
pub use watermark::Watermark;
