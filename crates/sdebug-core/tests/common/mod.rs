use sdebug_core::filter::{LogFilter, Scope, StateFilter};
use sdebug_core::model::{ComponentNode, LogEntry, LogLevel, StateEntry};

/// Log filter that admits every entry
#[allow(dead_code)]
pub fn all_logs() -> LogFilter {
    LogFilter {
        scope: Scope::all(),
        min_severity: LogLevel::Excessive,
    }
}

/// State filter that shows every path, display values included
#[allow(dead_code)]
pub fn all_state() -> StateFilter {
    StateFilter {
        scope: Scope::all(),
        show_internal: true,
    }
}

#[allow(dead_code)]
pub fn log(time: f64, path: &str, level: LogLevel) -> LogEntry {
    LogEntry::new(time, path, level, format!("{path} at {time}"))
}

#[allow(dead_code)]
pub fn int(path: &str, value: i64) -> StateEntry {
    StateEntry::new(path, value)
}

#[allow(dead_code)]
pub fn text(path: &str, value: &str) -> StateEntry {
    StateEntry::new(path, value)
}

/// Component node named after its last path segment
#[allow(dead_code)]
pub fn node(path: &str) -> ComponentNode {
    let name = path.rsplit('.').next().unwrap_or(path);
    ComponentNode::new(path, name)
}

/// The three display rows that make a component drawable
#[allow(dead_code)]
pub fn drawable(owner: &str, x: i64, y: i64, name: &str) -> Vec<StateEntry> {
    vec![
        int(&format!("{owner}.display-location-x"), x),
        int(&format!("{owner}.display-location-y"), y),
        text(&format!("{owner}.display-name"), name),
    ]
}
