//! sdebug Engine - Orchestration layer
//!
//! Drives the four dashboard projections: polls snapshots through an
//! injected fetch capability, reconciles them against the accepted ones
//! with the core diff engines, and forwards writes and time control to the
//! simulation.

#![allow(clippy::result_large_err)]

pub mod capability;
pub mod commands;
pub mod context;
pub mod projection;
pub mod reconciler;

pub use capability::{Control, DiffSink, Fetch, RunOutcome};
pub use context::ReconciliationContext;
pub use projection::{FetchRequest, Projection, Snapshot, ALL_STATE};
pub use reconciler::{PollTicket, Reconciler, Verdict};
