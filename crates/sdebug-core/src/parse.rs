//! Parsing helpers for user-typed arguments.

use crate::errors::{Result, SdebugError};
use crate::model::{LogLevel, ValueKind};

/// Time unit suffixes and their length in seconds
///
/// Longer suffixes come first so `ms` wins over `s`.
pub const UNITS: &[(&str, f64)] = &[
    ("ns", 0.000_000_001),
    ("us", 0.000_001),
    ("ms", 0.001),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 60.0 * 60.0),
    ("d", 24.0 * 60.0 * 60.0),
];

/// Convert text like `10.5ms` to seconds; a bare number is already seconds
///
/// # Errors
///
/// Returns `InvalidDuration` unless the text is a finite, non-negative
/// number followed by at most one unit suffix.
pub fn parse_duration(text: &str) -> Result<f64> {
    let invalid = || SdebugError::InvalidDuration {
        text: text.to_string(),
    };
    let trimmed = text.trim();
    let (number, scale) = UNITS
        .iter()
        .find(|(suffix, _)| trimmed.ends_with(suffix))
        .map(|(suffix, scale)| (&trimmed[..trimmed.len() - suffix.len()], *scale))
        .unwrap_or((trimmed, 1.0));

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value * scale)
}

/// Parse a lower-case log level name
///
/// # Errors
///
/// Returns `InvalidLevel` for unknown names.
pub fn parse_level(text: &str) -> Result<LogLevel> {
    LogLevel::parse(text)
}

/// Accept text that looks like a component or state path
///
/// Paths start with a letter, contain no whitespace, and are never a bare
/// log level name (those would be ambiguous on the command line).
///
/// # Errors
///
/// Returns `InvalidPath` otherwise.
pub fn parse_path(text: &str) -> Result<&str> {
    let starts_with_letter = text.chars().next().is_some_and(char::is_alphabetic);
    let has_whitespace = text.chars().any(char::is_whitespace);
    if starts_with_letter && !has_whitespace && LogLevel::parse(text).is_err() {
        Ok(text)
    } else {
        Err(SdebugError::InvalidPath {
            text: text.to_string(),
        })
    }
}

/// Kind a typed value is written as: integers are `int`, decimals with a
/// `.` are `float`, anything else is `string`
pub fn infer_kind(text: &str) -> ValueKind {
    if text.parse::<i64>().is_ok() {
        ValueKind::Int
    } else if text.contains('.') && text.parse::<f64>().is_ok() {
        ValueKind::Float
    } else {
        ValueKind::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_units() {
        assert_eq!(parse_duration("2").unwrap(), 2.0);
        assert_eq!(parse_duration("2s").unwrap(), 2.0);
        assert!((parse_duration("10ms").unwrap() - 0.01).abs() < 1e-12);
        assert_eq!(parse_duration("1.5m").unwrap(), 90.0);
        assert_eq!(parse_duration("1h").unwrap(), 3600.0);
        assert_eq!(parse_duration("1d").unwrap(), 86400.0);
        assert!((parse_duration("3us").unwrap() - 0.000_003).abs() < 1e-15);
    }

    #[test]
    fn test_duration_rejects_garbage() {
        for text in ["", "ms", "fast", "10 parsecs", "-1s", "infs", "1xs"] {
            assert!(
                matches!(
                    parse_duration(text),
                    Err(SdebugError::InvalidDuration { .. })
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_path_rules() {
        assert_eq!(parse_path("world.bob").unwrap(), "world.bob");
        assert!(parse_path("1world").is_err());
        assert!(parse_path("").is_err());
        assert!(parse_path("info").is_err());
        assert!(parse_path("world bob").is_err());
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind("42"), ValueKind::Int);
        assert_eq!(infer_kind("-7"), ValueKind::Int);
        assert_eq!(infer_kind("4.5"), ValueKind::Float);
        assert_eq!(infer_kind("1e3"), ValueKind::String);
        assert_eq!(infer_kind("hello"), ValueKind::String);
        assert_eq!(infer_kind(""), ValueKind::String);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LogLevel::Debug);
        assert!(parse_level("Debug").is_err());
    }
}
