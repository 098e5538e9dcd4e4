//! Boundary logging macros
//!
//! Every line carries `component`, `op` and `event`. Callers need
//! `tracing` and `sdebug-core-types` in scope as dependencies.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $event:ident, $op:expr, $($field:tt)*) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = sdebug_core_types::schema::OpEvent::$event.as_str(),
            $($field)*
        )
    };
}

/// Operation entered
///
/// ```
/// # use sdebug_core::log_op_start;
/// log_op_start!("poll", projection = "state");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, Start, $op, $($($field)*)?);
    };
}

/// Operation finished; `duration_ms` comes first
///
/// ```
/// # use sdebug_core::log_op_end;
/// log_op_end!("poll", duration_ms = 3, changed = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, End, $op, duration_ms = $duration, $($($field)*)?);
    };
}

/// Operation failed
///
/// `$err` is anything that converts into `ExError`; its kind, code and
/// message become `err.*` fields.
///
/// ```
/// # use sdebug_core::{log_op_error, errors::SdebugError};
/// let err = SdebugError::InvalidLevel { text: "loud".to_string() };
/// log_op_error!("parse_level", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            error,
            EndError,
            $op,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message(),
            $($($field)*)?
        );
    }};
}

/// Poll result dropped because its ticket went stale (debug level)
#[macro_export]
macro_rules! log_op_discarded {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(debug, Discarded, $op, $($($field)*)?);
    };
}
