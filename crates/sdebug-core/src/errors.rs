use sdebug_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using SdebugError
pub type Result<T> = std::result::Result<T, SdebugError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// surfaced by the debugger. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidLevel,
    InvalidDuration,
    InvalidPath,

    // Snapshot shape
    /// Payload decoded but violates the ordering/nesting/uniqueness invariants
    MalformedSnapshot,
    /// Fetch returned a snapshot for a different projection than requested
    SnapshotKindMismatch,

    // Transport
    /// Transport error, non-2xx status, or undecodable payload
    FetchFailure,
    Timeout,

    // Reconciliation
    /// A poll for the projection is already pending
    PollInFlight,

    // Control
    /// The backend refused a state write
    WriteRejected,

    // Internal
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidLevel => "ERR_INVALID_LEVEL",
            ExErrorKind::InvalidDuration => "ERR_INVALID_DURATION",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::MalformedSnapshot => "ERR_MALFORMED_SNAPSHOT",
            ExErrorKind::SnapshotKindMismatch => "ERR_SNAPSHOT_KIND_MISMATCH",
            ExErrorKind::FetchFailure => "ERR_FETCH_FAILURE",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::PollInFlight => "ERR_POLL_IN_FLIGHT",
            ExErrorKind::WriteRejected => "ERR_WRITE_REJECTED",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    projection: Option<String>,
    path: Option<String>,
    status: Option<u16>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            projection: None,
            path: None,
            status: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add projection context
    pub fn with_projection(mut self, projection: impl Into<String>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// Add state/component path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add backend HTTP status context
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the projection context, if any
    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the backend status, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(projection) = &self.projection {
            write!(f, " (projection: {})", projection)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for snapshot reconciliation and backend control
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdebugError {
    // ===== Snapshot Shape =====
    /// Two state entries share a path after sorting
    #[error("Duplicate state path in snapshot: {path}")]
    DuplicateStatePath { path: String },

    /// A component's path is not a dotted extension of its parent's
    #[error("Component {child} is not nested under parent {parent}")]
    ComponentPathNotNested { parent: String, child: String },

    /// A component path occurs twice in one tree
    #[error("Duplicate component path in tree: {path}")]
    DuplicateComponentPath { path: String },

    /// Fetch returned the wrong kind of snapshot
    #[error("Expected a {expected} snapshot, got {actual}")]
    SnapshotKindMismatch { expected: String, actual: String },

    // ===== Reconciliation =====
    /// A poll was started while another for the same projection is pending
    #[error("A poll for the {projection} projection is already in flight")]
    PollInFlight { projection: String },

    // ===== Transport =====
    /// The request never produced a response
    #[error("{operation} failed: {reason}")]
    FetchFailed { operation: String, reason: String },

    /// The request timed out
    #[error("{operation} timed out")]
    FetchTimedOut { operation: String },

    /// The backend answered with a non-2xx status
    #[error("{operation} failed with status {status}: {body}")]
    BackendStatus {
        operation: String,
        status: u16,
        body: String,
    },

    /// The response body did not decode
    #[error("{operation} result didn't parse: {reason}")]
    UndecodablePayload { operation: String, reason: String },

    // ===== Control =====
    /// The backend refused a state write
    #[error("Writing {path} was rejected: {reason}")]
    WriteRejected { path: String, reason: String },

    // ===== Input =====
    /// Unknown log level name
    #[error("Invalid log level: {text} (expected error, warning, info, debug, or excessive)")]
    InvalidLevel { text: String },

    /// Not a number with an optional time unit suffix
    #[error("Invalid duration: {text}")]
    InvalidDuration { text: String },

    /// Not a component path
    #[error("Invalid path: {text}")]
    InvalidPath { text: String },

    /// Generic invalid input
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SdebugError {
    /// True for shape violations of an otherwise decoded payload
    pub fn is_malformed_snapshot(&self) -> bool {
        matches!(
            self,
            SdebugError::DuplicateStatePath { .. }
                | SdebugError::ComponentPathNotNested { .. }
                | SdebugError::DuplicateComponentPath { .. }
        )
    }
}

/// Convert SdebugError to ExError
///
/// Boundaries (the reconciler, the CLI) report `ExError`; lower layers return
/// `SdebugError` and convert with `?` or `.into()`.
impl From<SdebugError> for ExError {
    fn from(err: SdebugError) -> Self {
        match err {
            SdebugError::DuplicateStatePath { path } => {
                ExError::new(ExErrorKind::MalformedSnapshot)
                    .with_path(path)
                    .with_message("Duplicate state path")
            }

            SdebugError::ComponentPathNotNested { parent, child } => {
                ExError::new(ExErrorKind::MalformedSnapshot)
                    .with_path(child)
                    .with_message(format!("Not nested under parent {}", parent))
            }

            SdebugError::DuplicateComponentPath { path } => {
                ExError::new(ExErrorKind::MalformedSnapshot)
                    .with_path(path)
                    .with_message("Duplicate component path")
            }

            SdebugError::SnapshotKindMismatch { expected, actual } => {
                ExError::new(ExErrorKind::SnapshotKindMismatch)
                    .with_projection(expected.clone())
                    .with_message(format!("Expected {} snapshot, got {}", expected, actual))
            }

            SdebugError::PollInFlight { projection } => ExError::new(ExErrorKind::PollInFlight)
                .with_projection(projection)
                .with_message("Previous poll has not completed"),

            SdebugError::FetchFailed { operation, reason } => {
                ExError::new(ExErrorKind::FetchFailure)
                    .with_op(operation)
                    .with_message(reason)
            }

            SdebugError::FetchTimedOut { operation } => ExError::new(ExErrorKind::Timeout)
                .with_op(operation)
                .with_message("Request timed out"),

            SdebugError::BackendStatus {
                operation,
                status,
                body,
            } => ExError::new(ExErrorKind::FetchFailure)
                .with_op(operation)
                .with_status(status)
                .with_message(body),

            SdebugError::UndecodablePayload { operation, reason } => {
                ExError::new(ExErrorKind::FetchFailure)
                    .with_op(operation)
                    .with_message(format!("Undecodable payload: {}", reason))
            }

            SdebugError::WriteRejected { path, reason } => ExError::new(ExErrorKind::WriteRejected)
                .with_op("set_state")
                .with_path(path)
                .with_message(reason),

            SdebugError::InvalidLevel { text } => ExError::new(ExErrorKind::InvalidLevel)
                .with_message(format!("Invalid log level: {}", text)),

            SdebugError::InvalidDuration { text } => ExError::new(ExErrorKind::InvalidDuration)
                .with_message(format!("Invalid duration: {}", text)),

            SdebugError::InvalidPath { text } => ExError::new(ExErrorKind::InvalidPath)
                .with_path(text)
                .with_message("Paths start with a letter and contain no whitespace"),

            SdebugError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            SdebugError::Serialization(message) => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Convert serde_json errors to SdebugError
impl From<serde_json::Error> for SdebugError {
    fn from(err: serde_json::Error) -> Self {
        SdebugError::Serialization(err.to_string())
    }
}
