//! Human-readable one-line summaries of projection diffs.

use crate::diff::model::{EntryStatus, ProjectionDiff};

/// Render a short summary of a [`ProjectionDiff`], e.g. for a status line
///
/// Informational only; renderers read the structured diff.
pub fn render_human_summary(diff: &ProjectionDiff) -> String {
    match diff {
        ProjectionDiff::Log(log) => {
            let noun = if log.entries.len() == 1 { "entry" } else { "entries" };
            match log.watermark {
                Some(w) => format!("log: {} new {noun} (through t={w})", log.entries.len()),
                None => format!("log: {} new {noun}", log.entries.len()),
            }
        }
        ProjectionDiff::State(state) => {
            let mut parts = Vec::new();
            for (status, label) in [
                (EntryStatus::Added, "added"),
                (EntryStatus::Changed, "changed"),
                (EntryStatus::Removed, "removed"),
            ] {
                let n = state.count(status);
                if n > 0 {
                    parts.push(format!("{n} {label}"));
                }
            }
            if parts.is_empty() {
                format!("state: {} values", state.rows.len())
            } else {
                format!("state: {}", parts.join(", "))
            }
        }
        ProjectionDiff::Tree(tree) => {
            format!("tree: {} components", tree.tree.node_count())
        }
        ProjectionDiff::Map(map) => {
            let title = map
                .layout
                .title
                .as_deref()
                .map(|t| format!(" ({t})"))
                .unwrap_or_default();
            format!("map: {} drawable components{title}", map.layout.entries.len())
        }
    }
}
