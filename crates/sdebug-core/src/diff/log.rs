//! Log projection diff.
//!
//! The log is append-only, so a batch is "changed" exactly when it yields a
//! different number of visible entries than the accepted list. Both sides
//! are filtered with the current watermark, which makes the comparison
//! effectively "does the batch contain anything new and visible".

use crate::diff::model::LogDiff;
use crate::filter::LogFilter;
use crate::model::LogEntry;
use crate::watermark::Watermark;

/// Entries of `entries` visible under `filter` past `watermark`
fn visible<'a>(
    entries: &'a [LogEntry],
    filter: &'a LogFilter,
    watermark: Watermark,
) -> impl Iterator<Item = &'a LogEntry> + 'a {
    entries
        .iter()
        .filter(move |e| filter.includes(e, watermark.value()))
}

/// True when `batch` should replace the accepted log view
///
/// An empty batch never changes the view.
pub fn log_has_changed(
    previous: &[LogEntry],
    batch: &[LogEntry],
    filter: &LogFilter,
    watermark: Watermark,
) -> bool {
    if batch.is_empty() {
        return false;
    }
    visible(previous, filter, watermark).count() != visible(batch, filter, watermark).count()
}

/// Diff a fetched batch against the accepted log view
///
/// Returns `None` when nothing changed. Otherwise the surviving entries are
/// stable-sorted by time and the returned watermark is the running maximum
/// of the old watermark and every emitted timestamp.
pub fn diff_log(
    previous: &[LogEntry],
    batch: &[LogEntry],
    filter: &LogFilter,
    watermark: Watermark,
) -> Option<LogDiff> {
    if !log_has_changed(previous, batch, filter, watermark) {
        return None;
    }

    let mut entries: Vec<LogEntry> = visible(batch, filter, watermark).cloned().collect();
    entries.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut next = watermark;
    for entry in &entries {
        next.advance(entry.time);
    }

    tracing::debug!(
        emitted = entries.len(),
        batch = batch.len(),
        watermark = ?next.value(),
        "log batch accepted"
    );

    Some(LogDiff {
        entries,
        watermark: next.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Scope;
    use crate::model::LogLevel;

    fn entry(time: f64, path: &str, level: LogLevel) -> LogEntry {
        LogEntry::new(time, path, level, format!("at {time}"))
    }

    fn everything() -> LogFilter {
        LogFilter {
            scope: Scope::all(),
            min_severity: LogLevel::Excessive,
        }
    }

    #[test]
    fn test_unsorted_batch_is_emitted_in_time_order() {
        let batch = vec![
            entry(0.5, "a", LogLevel::Info),
            entry(0.2, "a", LogLevel::Info),
        ];
        let diff = diff_log(&[], &batch, &everything(), Watermark::new()).unwrap();
        let times: Vec<f64> = diff.entries.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0.2, 0.5]);
        assert_eq!(diff.watermark, Some(0.5));
    }

    #[test]
    fn test_empty_batch_is_unchanged() {
        assert!(diff_log(&[], &[], &everything(), Watermark::new()).is_none());
        assert!(diff_log(&[], &[], &everything(), Watermark::at(3.0)).is_none());
    }

    #[test]
    fn test_entries_at_or_below_watermark_are_ignored() {
        let batch = vec![
            entry(1.0, "a", LogLevel::Info),
            entry(2.0, "a", LogLevel::Info),
        ];
        assert!(diff_log(&[], &batch, &everything(), Watermark::at(2.0)).is_none());

        let diff = diff_log(&[], &batch, &everything(), Watermark::at(1.0)).unwrap();
        assert_eq!(diff.entries.len(), 1);
        assert_eq!(diff.entries[0].time, 2.0);
    }

    #[test]
    fn test_filtered_entries_do_not_advance_watermark() {
        let filter = LogFilter {
            scope: Scope::all(),
            min_severity: LogLevel::Warning,
        };
        let batch = vec![
            entry(1.0, "a", LogLevel::Error),
            entry(9.0, "a", LogLevel::Debug),
        ];
        let diff = diff_log(&[], &batch, &filter, Watermark::new()).unwrap();
        assert_eq!(diff.entries.len(), 1);
        assert_eq!(diff.watermark, Some(1.0));
    }

    #[test]
    fn test_fully_filtered_batch_is_unchanged() {
        let filter = LogFilter {
            scope: Scope::new("world.bob"),
            min_severity: LogLevel::Excessive,
        };
        let batch = vec![entry(1.0, "world.alice", LogLevel::Info)];
        assert!(diff_log(&[], &batch, &filter, Watermark::new()).is_none());
    }

    #[test]
    fn test_equal_timestamps_keep_batch_order() {
        let mut first = entry(1.0, "a", LogLevel::Info);
        first.message = "first".to_string();
        let mut second = entry(1.0, "a", LogLevel::Info);
        second.message = "second".to_string();
        let diff = diff_log(&[], &[first, second], &everything(), Watermark::new()).unwrap();
        assert_eq!(diff.entries[0].message, "first");
        assert_eq!(diff.entries[1].message, "second");
    }
}
