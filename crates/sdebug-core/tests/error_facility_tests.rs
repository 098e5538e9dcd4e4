use sdebug_core::errors::{ExError, ExErrorKind, SdebugError};

#[test]
fn test_duplicate_state_path_verifiable_by_kind() {
    let err = SdebugError::DuplicateStatePath {
        path: "world.bob.x".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedSnapshot);
    assert_eq!(ex_err.code(), "ERR_MALFORMED_SNAPSHOT");
    assert_eq!(ex_err.path(), Some("world.bob.x"));
}

#[test]
fn test_transport_failures_share_fetch_kind() {
    let errs = vec![
        SdebugError::FetchFailed {
            operation: "GET /components".to_string(),
            reason: "connection reset".to_string(),
        },
        SdebugError::BackendStatus {
            operation: "GET /components".to_string(),
            status: 500,
            body: "oops".to_string(),
        },
        SdebugError::UndecodablePayload {
            operation: "GET /components".to_string(),
            reason: "expected object".to_string(),
        },
    ];

    for err in errs {
        let ex_err: ExError = err.into();
        assert_eq!(ex_err.kind(), ExErrorKind::FetchFailure);
        assert_eq!(ex_err.op(), Some("GET /components"));
    }
}

#[test]
fn test_timeout_is_distinct_from_fetch_failure() {
    let ex_err: ExError = SdebugError::FetchTimedOut {
        operation: "GET /state/**".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::Timeout);
    assert_ne!(ex_err.kind(), ExErrorKind::FetchFailure);
}

#[test]
fn test_write_rejected_conversion() {
    let ex_err: ExError = SdebugError::WriteRejected {
        path: "world.bob.mood".to_string(),
        reason: "unknown path".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::WriteRejected);
    assert_eq!(ex_err.code(), "ERR_WRITE_REJECTED");
    assert_eq!(ex_err.op(), Some("set_state"));
    assert_eq!(ex_err.path(), Some("world.bob.mood"));
}

#[test]
fn test_poll_in_flight_conversion() {
    let ex_err: ExError = SdebugError::PollInFlight {
        projection: "state".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::PollInFlight);
    assert_eq!(ex_err.projection(), Some("state"));
}

#[test]
fn test_input_errors_have_their_own_kinds() {
    let level: ExError = SdebugError::InvalidLevel {
        text: "loud".to_string(),
    }
    .into();
    let duration: ExError = SdebugError::InvalidDuration {
        text: "soon".to_string(),
    }
    .into();
    let path: ExError = SdebugError::InvalidPath {
        text: "1abc".to_string(),
    }
    .into();

    assert_eq!(level.code(), "ERR_INVALID_LEVEL");
    assert!(level.message().contains("loud"));
    assert_eq!(duration.code(), "ERR_INVALID_DURATION");
    assert_eq!(path.code(), "ERR_INVALID_PATH");
    assert_eq!(path.path(), Some("1abc"));
}

#[test]
fn test_serde_error_conversion() {
    let err: SdebugError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_ex_error_builder_pattern() {
    use sdebug_core_types::{RequestId, TraceId};

    let request_id = RequestId::new();
    let trace_id = TraceId::new();
    let ex_err = ExError::new(ExErrorKind::FetchFailure)
        .with_op("poll")
        .with_projection("log")
        .with_status(502)
        .with_message("bad gateway")
        .with_request_id(request_id.clone())
        .with_trace_id(trace_id.clone());

    assert_eq!(ex_err.op(), Some("poll"));
    assert_eq!(ex_err.projection(), Some("log"));
    assert_eq!(ex_err.status(), Some(502));
    assert_eq!(ex_err.request_id(), Some(&request_id));
    assert_eq!(ex_err.trace_id(), Some(&trace_id));
}

#[test]
fn test_ex_error_display() {
    let ex_err = ExError::new(ExErrorKind::MalformedSnapshot)
        .with_op("poll")
        .with_path("a.b")
        .with_message("Duplicate component path");

    let display_str = format!("{}", ex_err);

    assert!(display_str.contains("ERR_MALFORMED_SNAPSHOT"));
    assert!(display_str.contains("poll"));
    assert!(display_str.contains("a.b"));
}

#[test]
fn test_all_error_kinds_have_unique_codes() {
    use std::collections::HashSet;

    let kinds = vec![
        ExErrorKind::InvalidInput,
        ExErrorKind::InvalidLevel,
        ExErrorKind::InvalidDuration,
        ExErrorKind::InvalidPath,
        ExErrorKind::MalformedSnapshot,
        ExErrorKind::SnapshotKindMismatch,
        ExErrorKind::FetchFailure,
        ExErrorKind::Timeout,
        ExErrorKind::PollInFlight,
        ExErrorKind::WriteRejected,
        ExErrorKind::Serialization,
        ExErrorKind::Internal,
    ];

    let codes: HashSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());

    for code in codes {
        assert!(code.starts_with("ERR_"));
    }
}
