//! REST paths for each backend operation.

use sdebug_core::model::ValueKind;
use sdebug_engine::projection::FetchRequest;

/// Glob selecting every display value
pub const DISPLAY_GLOB: &str = "*.display-*";

/// Percent-encode one path segment
fn segment(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Percent-encode a state glob, leaving its `*` wildcards readable
fn glob_segment(glob: &str) -> String {
    urlencoding::encode(glob).replace("%2A", "*")
}

/// Path serving `request`
pub fn fetch_path(request: &FetchRequest) -> String {
    match request {
        FetchRequest::Log { after: None } => "/log".to_string(),
        FetchRequest::Log { after: Some(time) } => format!("/log/after/{}", time),
        FetchRequest::State { glob } => format!("/state/{}", glob_segment(glob)),
        FetchRequest::Components => "/components".to_string(),
        FetchRequest::Display => format!("/state/{}", DISPLAY_GLOB),
    }
}

pub fn write_path(kind: ValueKind, path: &str, value: &str) -> String {
    format!(
        "/state/{}/{}/{}",
        kind.as_str(),
        segment(path),
        segment(value)
    )
}

pub fn run_until_path(time: f64) -> String {
    format!("/run/until/{}", time)
}

pub const RUN_ONCE: &str = "/run/once";
pub const EXITED: &str = "/exited";
pub const PRECISION: &str = "/time/precision";
pub const TIME: &str = "/time";
