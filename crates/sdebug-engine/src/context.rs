//! Per-projection reconciliation state.

use sdebug_core::store::SnapshotStore;
use sdebug_core::watermark::Watermark;

use crate::projection::{FetchRequest, Projection, Snapshot, ALL_STATE};

/// Everything one projection remembers between polls
///
/// Holds the last accepted snapshot, the log watermark (used by the log
/// projection only), a generation counter bumped on every reset, and the
/// generation of the poll currently in flight.
#[derive(Debug, Clone)]
pub struct ReconciliationContext {
    projection: Projection,
    store: SnapshotStore<Snapshot>,
    watermark: Watermark,
    generation: u64,
    in_flight: Option<u64>,
    /// Glob sent with state fetches
    state_glob: String,
}

impl ReconciliationContext {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            store: SnapshotStore::new(),
            watermark: Watermark::new(),
            generation: 0,
            in_flight: None,
            state_glob: ALL_STATE.to_string(),
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Last accepted snapshot
    pub fn accepted(&self) -> Option<&Snapshot> {
        self.store.get()
    }

    pub fn watermark(&self) -> Watermark {
        self.watermark
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Request for the next poll of this projection
    pub fn next_request(&self) -> FetchRequest {
        match self.projection {
            Projection::Log => FetchRequest::Log {
                after: self.watermark.value(),
            },
            Projection::State => FetchRequest::State {
                glob: self.state_glob.clone(),
            },
            Projection::Tree => FetchRequest::Components,
            Projection::Map => FetchRequest::Display,
        }
    }

    /// Forget the accepted snapshot and watermark
    ///
    /// A pending poll keeps its mark: its result is discarded by generation,
    /// and no new poll may start until it finishes.
    pub fn reset(&mut self) {
        self.store.clear();
        self.watermark.reset();
        self.generation += 1;
    }

    pub fn state_glob(&self) -> &str {
        &self.state_glob
    }

    pub(crate) fn set_state_glob(&mut self, glob: String) {
        self.state_glob = glob;
    }

    /// Mark a poll as started; `false` if one is already pending
    pub(crate) fn begin(&mut self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.in_flight = Some(self.generation);
        true
    }

    /// Clear the pending mark if it belongs to `generation`
    pub(crate) fn finish(&mut self, generation: u64) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
        }
    }

    pub(crate) fn commit(&mut self, snapshot: Snapshot) {
        self.store.commit(snapshot);
    }

    pub(crate) fn advance_watermark(&mut self, time: f64) {
        self.watermark.advance(time);
    }
}
