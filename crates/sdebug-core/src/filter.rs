//! View filter predicates.
//!
//! A view is narrowed by an optional scope (a dotted component path), a
//! minimum log severity, and whether `display-*` values are shown. Every
//! predicate here is pure and cheap; the diff engines re-evaluate them on
//! every comparison.

use serde::{Deserialize, Serialize};

use crate::model::{LogEntry, LogLevel};

/// Path fragment marking values that only drive the map view
pub const DISPLAY_MARKER: &str = ".display-";

/// Dotted component path narrowing a view; empty means "everything"
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope(String);

impl Scope {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The unscoped view
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// `path` is `prefix` or lies underneath it
fn is_self_or_descendant(path: &str, prefix: &str) -> bool {
    path == prefix
        || (path.len() > prefix.len()
            && path.starts_with(prefix)
            && path.as_bytes()[prefix.len()] == b'.')
}

/// Log entry is newer than the watermark, from the scoped component, and
/// at least as severe as `min_severity`
///
/// Log scoping is exact: a scoped view shows only entries logged by the
/// scoped component itself.
pub fn include_log(
    entry: &LogEntry,
    scope: &Scope,
    min_severity: LogLevel,
    watermark: Option<f64>,
) -> bool {
    let after_watermark = match watermark {
        Some(w) => entry.time > w,
        None => true,
    };
    let in_scope = scope.is_empty() || entry.path == scope.as_str();
    after_watermark && in_scope && entry.severity_index <= min_severity.index()
}

/// State path is visible in the key/value view
pub fn include_state(path: &str, scope: &Scope, show_internal: bool) -> bool {
    (show_internal || !is_display_path(path))
        && (scope.is_empty() || is_self_or_descendant(path, scope.as_str()))
}

/// Component is the scoped component, one of its ancestors, or one of its
/// descendants
pub fn include_component(path: &str, scope: &Scope) -> bool {
    scope.is_empty()
        || is_self_or_descendant(path, scope.as_str())
        || is_self_or_descendant(scope.as_str(), path)
}

/// State path drives the map view
pub fn is_display_path(path: &str) -> bool {
    path.contains(DISPLAY_MARKER)
}

/// Parameters for the log projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogFilter {
    pub scope: Scope,
    pub min_severity: LogLevel,
}

impl LogFilter {
    pub fn includes(&self, entry: &LogEntry, watermark: Option<f64>) -> bool {
        include_log(entry, &self.scope, self.min_severity, watermark)
    }
}

/// Parameters for the key/value projection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFilter {
    pub scope: Scope,
    pub show_internal: bool,
}

impl StateFilter {
    pub fn includes(&self, path: &str) -> bool {
        include_state(path, &self.scope, self.show_internal)
    }
}

/// All user-controlled view settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub scope: Scope,
    pub min_severity: LogLevel,
    pub show_internal: bool,
}

impl ViewFilter {
    pub fn log(&self) -> LogFilter {
        LogFilter {
            scope: self.scope.clone(),
            min_severity: self.min_severity,
        }
    }

    pub fn state(&self) -> StateFilter {
        StateFilter {
            scope: self.scope.clone(),
            show_internal: self.show_internal,
        }
    }
}
