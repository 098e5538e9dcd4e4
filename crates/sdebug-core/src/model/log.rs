use serde::{Deserialize, Serialize};

use crate::errors::{Result, SdebugError};

/// Severity of a simulation log line, most severe first
///
/// The wire form is the capitalised variant name (`"Error"`, `"Warning"`, ...);
/// [`LogLevel::parse`] accepts the lower-case names users type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    Excessive,
}

impl LogLevel {
    /// All levels in severity-index order
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Excessive,
    ];

    /// Severity index: 0 for error, 1 for warning, and so on
    pub fn index(&self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warning => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Excessive => 4,
        }
    }

    /// Lower-case name as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Excessive => "excessive",
        }
    }

    /// Parse a lower-case level name
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` for anything other than the five level names.
    pub fn parse(text: &str) -> Result<Self> {
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.name() == text)
            .ok_or_else(|| SdebugError::InvalidLevel {
                text: text.to_string(),
            })
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One line of the simulation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Simulation time in seconds
    pub time: f64,

    /// Path of the component that logged the line
    pub path: String,

    pub level: LogLevel,

    /// Severity index as sent by the backend (0 = error)
    #[serde(rename = "index")]
    pub severity_index: u8,

    pub message: String,
}

impl LogEntry {
    /// Create an entry whose severity index matches its level
    pub fn new(
        time: f64,
        path: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            time,
            path: path.into(),
            level,
            severity_index: level.index(),
            message: message.into(),
        }
    }
}
