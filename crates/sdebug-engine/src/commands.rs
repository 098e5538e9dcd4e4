//! Engine-level action commands: state writes and time control.
//!
//! Each command validates user-typed text with the core parsers, drives the
//! injected [`Control`] capability, and logs its boundary. Failures are
//! returned to the caller directly; no projection store or watermark is
//! touched by a failed write.

use std::time::Instant;

use sdebug_core::errors::ExError;
use sdebug_core::model::ValueKind;
use sdebug_core::parse::{infer_kind, parse_duration, parse_path};
use sdebug_core::{log_op_end, log_op_error, log_op_start};
use sdebug_core_types::schema::{OP_RUN_UNTIL, OP_RUN_UNTIL_CHANGED, OP_SET_STATE};

use crate::capability::{Control, DiffSink, Fetch, RunOutcome};
use crate::reconciler::{Reconciler, Verdict};

/// Default cap on single steps for [`run_until_changed`]
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Write `value` to `path`, inferring its kind from the text
///
/// Returns the kind the value was written as.
///
/// # Errors
///
/// `InvalidPath` for a malformed path, otherwise whatever the backend
/// reports (typically `WriteRejected`).
pub async fn set_state<C>(control: &C, path: &str, value: &str) -> Result<ValueKind, ExError>
where
    C: Control + ?Sized,
{
    log_op_start!(OP_SET_STATE, path = path);
    let start = Instant::now();

    let result = async {
        let path = parse_path(path).map_err(ExError::from)?;
        let kind = infer_kind(value);
        control.set_state(kind, path, value).await?;
        Ok::<_, ExError>(kind)
    }
    .await;

    match &result {
        Ok(kind) => {
            log_op_end!(
                OP_SET_STATE,
                duration_ms = start.elapsed().as_millis() as u64,
                path = path,
                kind = kind.as_str()
            );
        }
        Err(err) => {
            log_op_error!(
                OP_SET_STATE,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = path
            );
        }
    }
    result
}

/// Run the simulation until the time given as text like `2.5s` or `300ms`
///
/// Returns the target time in seconds.
///
/// # Errors
///
/// `InvalidDuration` for unparsable text, otherwise transport errors.
pub async fn run_until<C>(control: &C, time: &str) -> Result<f64, ExError>
where
    C: Control + ?Sized,
{
    log_op_start!(OP_RUN_UNTIL, time = time);
    let start = Instant::now();

    let result = async {
        let seconds = parse_duration(time).map_err(ExError::from)?;
        control.run_until(seconds).await?;
        Ok::<_, ExError>(seconds)
    }
    .await;

    match &result {
        Ok(seconds) => {
            log_op_end!(
                OP_RUN_UNTIL,
                duration_ms = start.elapsed().as_millis() as u64,
                seconds = *seconds
            );
        }
        Err(err) => {
            log_op_error!(
                OP_RUN_UNTIL,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

/// How a [`run_until_changed`] loop ended
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Single steps taken
    pub steps: u64,
    /// The simulation reported it has exited
    pub exited: bool,
    /// Verdict of the last poll
    pub verdict: Verdict,
}

impl StepReport {
    /// The loop gave up before the view changed or the simulation exited
    pub fn exhausted(&self) -> bool {
        !self.exited && !self.verdict.changed
    }
}

/// Step the simulation one event at a time until the active projection
/// changes or the simulation exits
///
/// After every step the active projection is polled and any diff goes to
/// `sink`. A failed poll counts as a change, so a broken backend ends the
/// loop. `max_steps` bounds the loop for simulations that never change the
/// watched view.
///
/// # Errors
///
/// Transport errors from stepping; poll failures are reported through the
/// returned verdict instead.
pub async fn run_until_changed<B, S>(
    backend: &B,
    reconciler: &mut Reconciler,
    sink: &mut S,
    max_steps: u64,
) -> Result<StepReport, ExError>
where
    B: Fetch + Control + ?Sized,
    S: DiffSink + ?Sized,
{
    let projection = reconciler.active();
    log_op_start!(
        OP_RUN_UNTIL_CHANGED,
        projection = projection.name(),
        max_steps = max_steps
    );
    let start = Instant::now();

    let mut report = StepReport {
        steps: 0,
        exited: false,
        verdict: Verdict::unchanged(),
    };

    while report.steps < max_steps {
        let outcome = match backend.run_once().await {
            Ok(outcome) => outcome,
            Err(err) => {
                log_op_error!(
                    OP_RUN_UNTIL_CHANGED,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    steps = report.steps
                );
                return Err(err);
            }
        };
        report.steps += 1;
        report.exited = outcome == RunOutcome::Exited;
        report.verdict = reconciler.poll_with_sink(backend, sink).await;

        if report.exited || report.verdict.changed {
            break;
        }
    }

    log_op_end!(
        OP_RUN_UNTIL_CHANGED,
        duration_ms = start.elapsed().as_millis() as u64,
        steps = report.steps,
        exited = report.exited,
        changed = report.verdict.changed
    );
    Ok(report)
}

/// Simulation clock and run state, as shown in a header line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimStatus {
    pub time: f64,
    pub exited: bool,
}

impl SimStatus {
    /// `"{prefix} @ {time}s"` with `precision` decimals
    pub fn header(&self, prefix: &str, precision: usize) -> String {
        let mut line = format!("{} @ {:.*}s", prefix, precision, self.time);
        if self.exited {
            line.push_str(" (exited)");
        }
        line
    }
}

/// Read the current time and exited flag concurrently
///
/// # Errors
///
/// The first transport error of either request.
pub async fn status<C>(control: &C) -> Result<SimStatus, ExError>
where
    C: Control + ?Sized,
{
    let (time, exited) = futures::try_join!(control.time(), control.exited())?;
    Ok(SimStatus { time, exited })
}
