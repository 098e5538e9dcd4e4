//! Property tests for the projection diff engines.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sdebug_core::diff::{classify_state, diff_log, diff_map, diff_state, diff_tree};
use sdebug_core::filter::{include_state, LogFilter, Scope, StateFilter};
use sdebug_core::model::{ComponentNode, LogEntry, LogLevel, StateEntry, StateValue};
use sdebug_core::watermark::Watermark;

// -- Strategy helpers --

fn arb_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn arb_log_entry() -> impl Strategy<Value = LogEntry> {
    (0u32..1000, "[ab](\\.[xy])?", arb_level())
        .prop_map(|(t, path, level)| LogEntry::new(f64::from(t) / 10.0, path, level, "m"))
}

fn arb_value() -> impl Strategy<Value = StateValue> {
    prop_oneof![
        (-5i64..5).prop_map(StateValue::Int),
        (-5i32..5).prop_map(|x| StateValue::Float(f64::from(x) / 2.0)),
        "[a-c]{0,2}".prop_map(StateValue::Text),
    ]
}

fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ab]\\.[a-c]",
        "[ab]\\.[ab]\\.[a-c]",
        "[ab]\\.display-[a-c]",
    ]
}

/// Sorted snapshot with unique paths
fn arb_snapshot() -> impl Strategy<Value = Vec<StateEntry>> {
    prop::collection::btree_map(arb_path(), arb_value(), 0..12).prop_map(|rows| {
        rows.into_iter()
            .map(|(path, value)| StateEntry::new(path, value))
            .collect()
    })
}

fn arb_state_filter() -> impl Strategy<Value = StateFilter> {
    (
        prop_oneof![Just(""), Just("a"), Just("b"), Just("a.a")],
        any::<bool>(),
    )
        .prop_map(|(scope, show_internal)| StateFilter {
            scope: Scope::new(scope),
            show_internal,
        })
}

fn arb_tree() -> impl Strategy<Value = ComponentNode> {
    prop::collection::btree_map("[a-d]", "[xy]{0,1}", 0..5).prop_map(|children| {
        children
            .into_iter()
            .fold(ComponentNode::new("w", "w"), |root, (name, details)| {
                root.with_child(
                    ComponentNode::new(format!("w.{name}"), name).with_details(details),
                )
            })
    })
}

proptest! {
    /// A snapshot diffed against itself never changes the view.
    #[test]
    fn state_diff_is_idempotent(snap in arb_snapshot(), filter in arb_state_filter()) {
        prop_assert!(diff_state(&snap, &snap, &filter).is_none());
    }

    #[test]
    fn map_diff_is_idempotent(snap in arb_snapshot()) {
        prop_assert!(diff_map(&snap, &snap).is_none());
    }

    #[test]
    fn tree_diff_is_idempotent(tree in arb_tree()) {
        prop_assert!(diff_tree(Some(&tree), &tree, &Scope::all()).is_none());
        prop_assert!(diff_tree(Some(&tree), &tree, &Scope::new("w.a")).is_none());
    }

    /// Every visible path of either side is classified exactly once.
    #[test]
    fn state_classification_is_complete(
        prev in arb_snapshot(),
        new in arb_snapshot(),
        filter in arb_state_filter(),
    ) {
        let diff = classify_state(&prev, &new, &filter);

        let classified: Vec<&str> = diff.rows.iter().map(|r| r.entry.path.as_str()).collect();
        let unique: BTreeSet<&str> = classified.iter().copied().collect();
        prop_assert_eq!(classified.len(), unique.len());

        let expected: BTreeSet<&str> = prev
            .iter()
            .chain(new.iter())
            .map(|e| e.path.as_str())
            .filter(|p| filter.includes(p))
            .collect();
        prop_assert_eq!(unique, expected);
    }

    /// The watermark never moves down across a sequence of polls.
    #[test]
    fn watermark_is_monotonic(
        batches in prop::collection::vec(prop::collection::vec(arb_log_entry(), 0..6), 1..6),
        level in arb_level(),
    ) {
        let filter = LogFilter { scope: Scope::all(), min_severity: level };
        let mut mark = Watermark::new();
        let mut accepted: Vec<LogEntry> = Vec::new();

        for batch in batches {
            let before = mark.value();
            if let Some(diff) = diff_log(&accepted, &batch, &filter, mark) {
                if let (Some(old), Some(new)) = (before, diff.watermark) {
                    prop_assert!(new >= old);
                }
                prop_assert!(diff.watermark.is_some());
                if let Some(w) = diff.watermark {
                    mark = Watermark::at(w);
                }
                accepted = diff.entries;
            } else {
                prop_assert_eq!(mark.value(), before);
            }
        }
    }

    #[test]
    fn unscoped_internal_view_includes_every_path(path in "[a-z][a-z.\\-]{0,12}") {
        prop_assert!(include_state(&path, &Scope::all(), true));
    }
}
