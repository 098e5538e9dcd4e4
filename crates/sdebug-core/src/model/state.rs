use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Declared type of a state value, as used on the write endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Int,
    Float,
    String,
}

impl ValueKind {
    /// Wire name (`int`, `float`, `string`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state value: a JSON number or string
///
/// Equality is strict: values of different variants never compare equal, and
/// floats compare by total order so every snapshot equals itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl StateValue {
    /// Numeric view of the value; numeric text is accepted
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StateValue::Int(i) => Some(*i as f64),
            StateValue::Float(x) => Some(*x),
            StateValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// The kind a value of this variant is written back as
    pub fn natural_kind(&self) -> ValueKind {
        match self {
            StateValue::Int(_) => ValueKind::Int,
            StateValue::Float(_) => ValueKind::Float,
            StateValue::Text(_) => ValueKind::String,
        }
    }
}

impl PartialEq for StateValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StateValue::Int(a), StateValue::Int(b)) => a == b,
            (StateValue::Float(a), StateValue::Float(b)) => a.total_cmp(b) == Ordering::Equal,
            (StateValue::Text(a), StateValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for StateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::Float(x) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, x),
                None => write!(f, "{}", x),
            },
            StateValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

/// One `path = value` row of the flat simulation store
///
/// Encoded on the wire as the triple `[path, value, kind]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateTriple", into = "StateTriple")]
pub struct StateEntry {
    /// Dotted path; the last segment names the value, the rest its component
    pub path: String,
    pub value: StateValue,
    pub kind: ValueKind,
}

#[derive(Serialize, Deserialize)]
struct StateTriple(String, StateValue, ValueKind);

impl From<StateTriple> for StateEntry {
    fn from(StateTriple(path, value, kind): StateTriple) -> Self {
        Self { path, value, kind }
    }
}

impl From<StateEntry> for StateTriple {
    fn from(entry: StateEntry) -> Self {
        StateTriple(entry.path, entry.value, entry.kind)
    }
}

impl StateEntry {
    /// Create an entry whose kind follows the value's variant
    pub fn new(path: impl Into<String>, value: impl Into<StateValue>) -> Self {
        let value = value.into();
        Self {
            path: path.into(),
            kind: value.natural_kind(),
            value,
        }
    }

    /// Owning component path (everything before the last `.`)
    pub fn owner(&self) -> &str {
        split_path(&self.path).0
    }

    /// Value name (the last path segment)
    pub fn key(&self) -> &str {
        split_path(&self.path).1
    }
}

/// Split a dotted path into `(owner, last segment)`
///
/// A path without a dot has an empty owner.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('.') {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}
