//! Terminal rendering of projection diffs.

use std::io::{self, Write};

use sdebug_core::diff::{
    outline, EntryStatus, LogDiff, MapDiff, ProjectionDiff, StateDiff, TreeDiff,
};
use sdebug_core::filter::Scope;
use sdebug_core::model::LogLevel;
use sdebug_engine::capability::DiffSink;

const RESET: &str = "\x1b[0m";

/// How values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub colorize: bool,
    /// Decimal places for times and float values
    pub precision: usize,
}

impl Style {
    fn paint(&self, color: &str, text: &str) -> String {
        if self.colorize && !color.is_empty() {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "\x1b[31;1m",
        LogLevel::Warning => "\x1b[31m",
        LogLevel::Info => "\x1b[30;1m",
        LogLevel::Debug => "",
        LogLevel::Excessive => "\x1b[1;38;5;244m",
    }
}

fn status_marker(status: EntryStatus) -> (&'static str, &'static str) {
    match status {
        EntryStatus::Added => ("+", "\x1b[32m"),
        EntryStatus::Changed => ("*", "\x1b[33;1m"),
        EntryStatus::Unchanged => (" ", ""),
        EntryStatus::Removed => ("-", "\x1b[9;38;5;244m"),
    }
}

/// ANSI foreground for a `display-color` name
fn named_color(name: &str) -> &'static str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",
        "gray" | "grey" => "\x1b[38;5;244m",
        _ => "",
    }
}

pub fn log_lines(diff: &LogDiff, style: Style) -> Vec<String> {
    diff.entries
        .iter()
        .map(|entry| {
            let time = format!("{:.*}", style.precision, entry.time);
            if style.colorize {
                style.paint(
                    level_color(entry.level),
                    &format!("{}  {}  {}", time, entry.path, entry.message),
                )
            } else {
                format!(
                    "{}  {:<9} {}  {}",
                    time,
                    entry.level.name(),
                    entry.path,
                    entry.message
                )
            }
        })
        .collect()
}

/// `path = value` rows with a blank line between components
pub fn state_lines(diff: &StateDiff, style: Style) -> Vec<String> {
    let mut lines = Vec::new();
    let mut component: Option<&str> = None;

    for row in &diff.rows {
        let owner = row.entry.owner();
        if matches!(component, Some(c) if c != owner) {
            lines.push(String::new());
        }
        component = Some(owner);

        let (marker, color) = status_marker(row.status);
        let text = format!(
            "{} {} = {:.*}",
            marker, row.entry.path, style.precision, row.entry.value
        );
        lines.push(style.paint(color, &text));
    }
    lines
}

/// Indented outline of the tree, two spaces per level
pub fn tree_lines(diff: &TreeDiff, scope: &Scope) -> Vec<String> {
    outline(&diff.tree, scope)
        .into_iter()
        .map(|(depth, node)| {
            let indent = "  ".repeat(depth);
            if node.details.is_empty() {
                format!("{indent}{}", node.name)
            } else {
                format!("{indent}{} - {}", node.name, node.details)
            }
        })
        .collect()
}

pub fn map_lines(diff: &MapDiff, style: Style) -> Vec<String> {
    let layout = &diff.layout;
    let mut lines = Vec::new();

    let mut heading = layout.title.clone().unwrap_or_default();
    if let Some(extent) = layout.extent {
        if !heading.is_empty() {
            heading.push(' ');
        }
        heading.push_str(&format!(
            "[{:.*} x {:.*}]",
            style.precision, extent.width, style.precision, extent.height
        ));
    }
    if !heading.is_empty() {
        lines.push(heading);
    }

    for entry in &layout.entries {
        let name = style.paint(named_color(&entry.color), &entry.name);
        let mut line = format!(
            "{} @ ({:.*}, {:.*})  {}",
            name, style.precision, entry.x, style.precision, entry.y, entry.owner
        );
        if let Some(details) = &entry.details {
            line.push_str("  ");
            line.push_str(details);
        }
        lines.push(line);
    }
    lines
}

pub fn diff_lines(diff: &ProjectionDiff, style: Style, scope: &Scope) -> Vec<String> {
    match diff {
        ProjectionDiff::Log(log) => log_lines(log, style),
        ProjectionDiff::State(state) => state_lines(state, style),
        ProjectionDiff::Tree(tree) => tree_lines(tree, scope),
        ProjectionDiff::Map(map) => map_lines(map, style),
    }
}

/// Prints every diff it receives
///
/// Log diffs append; other projections are replaced wholesale, so they are
/// printed after a separator line.
pub struct TerminalSink<W: Write> {
    writer: W,
    style: Style,
    scope: Scope,
    log_tail: Option<usize>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W, style: Style, scope: Scope) -> Self {
        Self {
            writer,
            style,
            scope,
            log_tail: None,
            error: None,
        }
    }

    /// Print at most the last `lines` entries of each log diff
    pub fn with_log_tail(mut self, lines: Option<usize>) -> Self {
        self.log_tail = lines;
        self
    }

    /// First write error, if any; later diffs are dropped once one occurs
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_diff(&mut self, diff: &ProjectionDiff) -> io::Result<()> {
        if !matches!(diff, ProjectionDiff::Log(_)) {
            writeln!(self.writer, "--- {}", diff.projection_name())?;
        }
        let mut lines = diff_lines(diff, self.style, &self.scope);
        if let (ProjectionDiff::Log(_), Some(tail)) = (diff, self.log_tail) {
            lines.drain(..lines.len().saturating_sub(tail));
        }
        for line in lines {
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()
    }
}

impl<W: Write> DiffSink for TerminalSink<W> {
    fn emit(&mut self, diff: &ProjectionDiff) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_diff(diff) {
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdebug_core::diff::StateRow;
    use sdebug_core::model::{ComponentNode, DisplayEntry, LogEntry, MapLayout, StateEntry};

    const PLAIN: Style = Style {
        colorize: false,
        precision: 2,
    };

    fn row(path: &str, value: f64, status: EntryStatus) -> StateRow {
        StateRow {
            entry: StateEntry::new(path, value),
            status,
        }
    }

    #[test]
    fn test_log_lines_plain() {
        let diff = LogDiff {
            entries: vec![LogEntry::new(1.5, "sim.pump", LogLevel::Warning, "low")],
            watermark: Some(1.5),
        };
        assert_eq!(
            log_lines(&diff, PLAIN),
            vec!["1.50  warning   sim.pump  low".to_string()]
        );
    }

    #[test]
    fn test_log_lines_colored() {
        let style = Style {
            colorize: true,
            precision: 0,
        };
        let diff = LogDiff {
            entries: vec![LogEntry::new(3.0, "sim", LogLevel::Error, "boom")],
            watermark: Some(3.0),
        };
        assert_eq!(
            log_lines(&diff, style),
            vec!["\x1b[31;1m3  sim  boom\x1b[0m".to_string()]
        );
    }

    #[test]
    fn test_state_lines_group_components() {
        let diff = StateDiff {
            rows: vec![
                row("a.x", 1.0, EntryStatus::Unchanged),
                row("a.y", 2.25, EntryStatus::Changed),
                row("b.x", 0.5, EntryStatus::Added),
                row("b.z", 4.0, EntryStatus::Removed),
            ],
        };
        assert_eq!(
            state_lines(&diff, PLAIN),
            vec![
                "  a.x = 1.00",
                "* a.y = 2.25",
                "",
                "+ b.x = 0.50",
                "- b.z = 4.00",
            ]
        );
    }

    #[test]
    fn test_tree_lines_indent_by_depth() {
        let tree = ComponentNode::new("sim", "sim")
            .with_child(ComponentNode::new("sim.pump", "pump").with_details("idle"));
        let diff = TreeDiff { tree };
        assert_eq!(
            tree_lines(&diff, &Scope::all()),
            vec!["sim".to_string(), "  pump - idle".to_string()]
        );
    }

    #[test]
    fn test_map_lines() {
        let diff = MapDiff {
            layout: MapLayout {
                title: Some("Plant".to_string()),
                extent: None,
                entries: vec![DisplayEntry {
                    owner: "sim.pump".to_string(),
                    x: 1.0,
                    y: 2.0,
                    name: "P1".to_string(),
                    details: Some("running".to_string()),
                    color: "red".to_string(),
                }],
            },
        };
        assert_eq!(
            map_lines(&diff, PLAIN),
            vec![
                "Plant".to_string(),
                "P1 @ (1.00, 2.00)  sim.pump  running".to_string()
            ]
        );
    }

    #[test]
    fn test_sink_separates_replaced_views() {
        let mut sink = TerminalSink::new(Vec::new(), PLAIN, Scope::all());
        sink.emit(&ProjectionDiff::Tree(TreeDiff {
            tree: ComponentNode::new("sim", "sim"),
        }));
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "--- tree\nsim\n");
    }

    #[test]
    fn test_sink_keeps_last_log_lines() {
        let mut sink =
            TerminalSink::new(Vec::new(), PLAIN, Scope::all()).with_log_tail(Some(2));
        sink.emit(&ProjectionDiff::Log(LogDiff {
            entries: vec![
                LogEntry::new(1.0, "sim", LogLevel::Info, "one"),
                LogEntry::new(2.0, "sim", LogLevel::Info, "two"),
                LogEntry::new(3.0, "sim", LogLevel::Info, "three"),
            ],
            watermark: Some(3.0),
        }));
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "2.00  info      sim  two\n3.00  info      sim  three\n"
        );
    }
}
