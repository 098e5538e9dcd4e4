//! Poll-cycle orchestration with boundary logging.
//!
//! One [`Reconciler`] drives the dashboard: it owns a
//! [`ReconciliationContext`] per projection, knows which projection is
//! active, and holds the view filter. A poll fetches a snapshot through the
//! injected [`Fetch`] capability, diffs it against the accepted one, and on
//! change commits it and hands the diff back (and to a [`DiffSink`]).
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for polls:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//! - `log_op_discarded!` when a result arrives for a reset or inactive projection
//!
//! Lower layers (core diff engines) use only `tracing::debug!()`.

use std::time::Instant;

use sdebug_core::diff::{
    diff_log, diff_map, diff_state, diff_tree, normalize_state, validate_tree, ProjectionDiff,
};
use sdebug_core::errors::{ExError, SdebugError};
use sdebug_core::filter::{Scope, ViewFilter};
use sdebug_core::model::{LogEntry, LogLevel, StateEntry};
use sdebug_core::{log_op_discarded, log_op_end, log_op_error, log_op_start};
use sdebug_core_types::schema::OP_POLL;
use sdebug_core_types::{RequestContext, TraceId};

use crate::capability::{DiffSink, Fetch};
use crate::context::ReconciliationContext;
use crate::projection::{FetchRequest, Projection, Snapshot};

/// Outcome of one poll
///
/// `changed` tells the caller whether to redraw. Any failed fetch or
/// malformed snapshot reports `changed = true` with no diff and the failure
/// attached, so "poll until changed" loops end on a broken backend. Only a
/// poll refused because another is pending reports `changed = false`.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub changed: bool,
    pub diff: Option<ProjectionDiff>,
    pub failure: Option<ExError>,
    /// The result was for a projection that was reset or switched away from
    pub discarded: bool,
}

impl Verdict {
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            diff: None,
            failure: None,
            discarded: false,
        }
    }

    pub fn changed(diff: ProjectionDiff) -> Self {
        Self {
            changed: true,
            diff: Some(diff),
            failure: None,
            discarded: false,
        }
    }

    /// Failed fetch or snapshot; always counts as a change
    pub fn failed(err: ExError) -> Self {
        Self {
            changed: true,
            diff: None,
            failure: Some(err),
            discarded: false,
        }
    }

    /// Poll never started because another is pending
    pub fn refused(err: ExError) -> Self {
        Self {
            failure: Some(err),
            ..Self::unchanged()
        }
    }

    pub fn discarded() -> Self {
        Self {
            discarded: true,
            ..Self::unchanged()
        }
    }
}

/// Handle for a poll that has been started but not completed
#[derive(Debug, Clone)]
pub struct PollTicket {
    pub projection: Projection,
    pub generation: u64,
    pub request: FetchRequest,
    pub context: RequestContext,
}

/// Snapshot reconciler for all four projections
#[derive(Debug, Clone)]
pub struct Reconciler {
    contexts: [ReconciliationContext; 4],
    active: Projection,
    filter: ViewFilter,
    trace_id: Option<TraceId>,
}

impl Reconciler {
    pub fn new(active: Projection) -> Self {
        Self {
            contexts: Projection::ALL.map(ReconciliationContext::new),
            active,
            filter: ViewFilter::default(),
            trace_id: None,
        }
    }

    pub fn with_filter(mut self, filter: ViewFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Tag every poll of this reconciler with one trace id
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Fetch only state paths matching `glob` (`**` by default)
    pub fn with_state_glob(mut self, glob: impl Into<String>) -> Self {
        self.context_mut(Projection::State).set_state_glob(glob.into());
        self
    }

    pub fn active(&self) -> Projection {
        self.active
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn context(&self, projection: Projection) -> &ReconciliationContext {
        &self.contexts[projection.index()]
    }

    fn context_mut(&mut self, projection: Projection) -> &mut ReconciliationContext {
        &mut self.contexts[projection.index()]
    }

    /// Forget `projection`'s accepted snapshot (and watermark, for the log)
    pub fn reset(&mut self, projection: Projection) {
        tracing::debug!(projection = projection.name(), "projection reset");
        self.context_mut(projection).reset();
    }

    /// Make `projection` the active view, starting it from scratch
    ///
    /// A poll still pending for the previously active projection is
    /// discarded when it completes.
    pub fn select(&mut self, projection: Projection) {
        if projection != self.active {
            self.reset(self.active);
            self.active = projection;
        }
        self.reset(projection);
    }

    /// Narrow every view to `scope`
    pub fn set_scope(&mut self, scope: Scope) {
        self.filter.scope = scope;
        for projection in Projection::ALL {
            self.reset(projection);
        }
    }

    pub fn set_min_severity(&mut self, level: LogLevel) {
        self.filter.min_severity = level;
        self.reset(Projection::Log);
    }

    pub fn set_show_internal(&mut self, show_internal: bool) {
        self.filter.show_internal = show_internal;
        self.reset(Projection::State);
    }

    /// Start a poll of the active projection
    ///
    /// # Errors
    ///
    /// `PollInFlight` if a poll of the active projection is still pending.
    pub fn begin_poll(&mut self) -> Result<PollTicket, ExError> {
        let projection = self.active;
        let mut context = RequestContext::new();
        if let Some(trace_id) = &self.trace_id {
            context = context.with_trace_id(trace_id.clone());
        }

        let ctx = self.context_mut(projection);
        if !ctx.begin() {
            let err: ExError = SdebugError::PollInFlight {
                projection: projection.name().to_string(),
            }
            .into();
            return Err(err.with_request_id(context.request_id));
        }

        Ok(PollTicket {
            projection,
            generation: ctx.generation(),
            request: ctx.next_request(),
            context,
        })
    }

    /// Finish a poll with the fetch result
    ///
    /// Results for a projection that is no longer active, or that was reset
    /// after the ticket was issued, are discarded without touching any state.
    pub fn complete(&mut self, ticket: PollTicket, result: Result<Snapshot, ExError>) -> Verdict {
        let projection = ticket.projection;
        let active = self.active;
        let ctx = &mut self.contexts[projection.index()];
        ctx.finish(ticket.generation);

        if projection != active || ticket.generation != ctx.generation() {
            log_op_discarded!(
                OP_POLL,
                projection = projection.name(),
                request_id = ticket.context.request_id.as_str()
            );
            return Verdict::discarded();
        }

        let outcome = result.and_then(|snapshot| {
            reconcile(ctx, &self.filter, snapshot).map_err(ExError::from)
        });

        match outcome {
            Ok(Some(diff)) => Verdict::changed(diff),
            Ok(None) => Verdict::unchanged(),
            Err(err) => Verdict::failed(annotate(err, &ticket)),
        }
    }

    /// Fetch and reconcile the active projection
    pub async fn poll<F>(&mut self, fetch: &F) -> Verdict
    where
        F: Fetch + ?Sized,
    {
        let projection = self.active;
        let trace = self
            .trace_id
            .as_ref()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default();
        log_op_start!(
            OP_POLL,
            projection = projection.name(),
            trace_id = trace.as_str()
        );
        let start = Instant::now();

        let ticket = match self.begin_poll() {
            Ok(ticket) => ticket,
            Err(err) => {
                log_op_error!(
                    OP_POLL,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    projection = projection.name(),
                    trace_id = trace.as_str()
                );
                return Verdict::refused(err);
            }
        };
        let request_id = ticket.context.request_id.clone();

        let result = fetch.fetch(&ticket.request).await;
        let verdict = self.complete(ticket, result);

        match &verdict.failure {
            Some(err) => {
                log_op_error!(
                    OP_POLL,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    projection = projection.name(),
                    request_id = request_id.as_str(),
                    trace_id = trace.as_str()
                );
            }
            None => {
                log_op_end!(
                    OP_POLL,
                    duration_ms = start.elapsed().as_millis() as u64,
                    projection = projection.name(),
                    request_id = request_id.as_str(),
                    trace_id = trace.as_str(),
                    changed = verdict.changed,
                    diff_len = verdict.diff.as_ref().map_or(0, ProjectionDiff::len) as u64
                );
            }
        }

        verdict
    }

    /// [`Reconciler::poll`], emitting any diff to `sink`
    pub async fn poll_with_sink<F, S>(&mut self, fetch: &F, sink: &mut S) -> Verdict
    where
        F: Fetch + ?Sized,
        S: DiffSink + ?Sized,
    {
        let verdict = self.poll(fetch).await;
        if let Some(diff) = &verdict.diff {
            sink.emit(diff);
        }
        verdict
    }
}

/// Attach poll context to a failure, keeping a more specific op if set
fn annotate(err: ExError, ticket: &PollTicket) -> ExError {
    let err = if err.op().is_none() {
        err.with_op(OP_POLL)
    } else {
        err
    };
    let err = err
        .with_projection(ticket.projection.name())
        .with_request_id(ticket.context.request_id.clone());
    match &ticket.context.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

/// Diff `snapshot` against the context's accepted one and commit on change
fn reconcile(
    ctx: &mut ReconciliationContext,
    filter: &ViewFilter,
    snapshot: Snapshot,
) -> Result<Option<ProjectionDiff>, SdebugError> {
    let expected = ctx.projection();
    if snapshot.projection() != expected {
        return Err(SdebugError::SnapshotKindMismatch {
            expected: expected.name().to_string(),
            actual: snapshot.projection().name().to_string(),
        });
    }

    match snapshot {
        Snapshot::Log(batch) => {
            let diff = {
                let previous: &[LogEntry] = match ctx.accepted() {
                    Some(Snapshot::Log(entries)) => entries,
                    _ => &[],
                };
                diff_log(previous, &batch, &filter.log(), ctx.watermark())
            };
            Ok(diff.map(|diff| {
                if let Some(w) = diff.watermark {
                    ctx.advance_watermark(w);
                }
                ctx.commit(Snapshot::Log(diff.entries.clone()));
                ProjectionDiff::Log(diff)
            }))
        }
        Snapshot::State(entries) => {
            let current = normalize_state(entries)?;
            let diff = {
                let previous: &[StateEntry] = match ctx.accepted() {
                    Some(Snapshot::State(entries)) => entries,
                    _ => &[],
                };
                diff_state(previous, &current, &filter.state())
            };
            Ok(diff.map(|diff| {
                ctx.commit(Snapshot::State(current));
                ProjectionDiff::State(diff)
            }))
        }
        Snapshot::Tree(tree) => {
            validate_tree(&tree)?;
            let diff = {
                let previous = match ctx.accepted() {
                    Some(Snapshot::Tree(root)) => Some(root),
                    _ => None,
                };
                diff_tree(previous, &tree, &filter.scope)
            };
            Ok(diff.map(|diff| {
                ctx.commit(Snapshot::Tree(tree));
                ProjectionDiff::Tree(diff)
            }))
        }
        Snapshot::Map(entries) => {
            let current = normalize_state(entries)?;
            let diff = {
                let previous: &[StateEntry] = match ctx.accepted() {
                    Some(Snapshot::Map(entries)) => entries,
                    _ => &[],
                };
                diff_map(previous, &current)
            };
            Ok(diff.map(|diff| {
                ctx.commit(Snapshot::Map(current));
                ProjectionDiff::Map(diff)
            }))
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(Projection::Log)
    }
}
