//! Capabilities the engine is driven through.
//!
//! The engine never talks to the simulation directly. Callers inject a
//! [`Fetch`] implementation for reads and a [`Control`] implementation for
//! writes and time control; timeouts and retries are theirs to own.

use async_trait::async_trait;

use sdebug_core::diff::ProjectionDiff;
use sdebug_core::errors::ExError;
use sdebug_core::model::ValueKind;

use crate::projection::{FetchRequest, Snapshot};

/// Read access to the simulation's state surface
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch and decode one snapshot
    ///
    /// # Errors
    ///
    /// `FetchFailure` or `Timeout` when the backend can't be reached, answers
    /// with a non-2xx status, or sends an undecodable body.
    async fn fetch(&self, request: &FetchRequest) -> Result<Snapshot, ExError>;
}

/// Acknowledgement of a single simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The simulation advanced and can keep running
    Running,
    /// The simulation has finished; further steps do nothing
    Exited,
}

/// Write access and time control
#[async_trait]
pub trait Control: Send + Sync {
    /// Write one state value
    ///
    /// # Errors
    ///
    /// `WriteRejected` when the backend refuses the write, or a transport
    /// error.
    async fn set_state(&self, kind: ValueKind, path: &str, value: &str) -> Result<(), ExError>;

    /// Run until simulation time `time` (seconds)
    ///
    /// # Errors
    ///
    /// Transport errors.
    async fn run_until(&self, time: f64) -> Result<(), ExError>;

    /// Run a single event
    ///
    /// # Errors
    ///
    /// Transport errors.
    async fn run_once(&self) -> Result<RunOutcome, ExError>;

    /// Whether the simulation has finished
    ///
    /// # Errors
    ///
    /// Transport errors.
    async fn exited(&self) -> Result<bool, ExError>;

    /// Decimal places the simulation uses for times and floats
    ///
    /// # Errors
    ///
    /// Transport errors.
    async fn precision(&self) -> Result<usize, ExError>;

    /// Current simulation time in seconds
    ///
    /// # Errors
    ///
    /// Transport errors.
    async fn time(&self) -> Result<f64, ExError>;
}

/// Receiver of emitted diffs (a renderer, a test recorder, ...)
pub trait DiffSink {
    fn emit(&mut self, diff: &ProjectionDiff);
}

impl DiffSink for Vec<ProjectionDiff> {
    fn emit(&mut self, diff: &ProjectionDiff) {
        self.push(diff.clone());
    }
}
