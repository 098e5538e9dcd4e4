//! Single-slot snapshot store.

/// The most recent accepted snapshot of one projection
///
/// Snapshots are replaced wholesale, never edited in place.
#[derive(Debug, Clone)]
pub struct SnapshotStore<T> {
    current: Option<T>,
}

impl<T> SnapshotStore<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Accepted snapshot, if any
    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Replace the stored snapshot, returning the previous one
    pub fn commit(&mut self, snapshot: T) -> Option<T> {
        self.current.replace(snapshot)
    }

    /// Forget the stored snapshot
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl<T> Default for SnapshotStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
