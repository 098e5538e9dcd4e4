use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use sdebug_core::errors::{ExError, ExErrorKind};
use sdebug_core::model::{ComponentNode, LogEntry, LogLevel, StateEntry, ValueKind};
use sdebug_engine::capability::{Control, Fetch, RunOutcome};
use sdebug_engine::projection::{FetchRequest, Snapshot};

/// In-memory backend that answers fetches from a script
///
/// Each fetch pops the next scripted result; the last one repeats once the
/// script runs out. Steps pop scripted outcomes the same way and default to
/// `Running`.
#[derive(Default)]
#[allow(dead_code)]
pub struct ScriptedBackend {
    pub fetches: Mutex<VecDeque<Result<Snapshot, ExError>>>,
    pub steps: Mutex<VecDeque<RunOutcome>>,
    pub requests: Mutex<Vec<FetchRequest>>,
    pub writes: Mutex<Vec<(ValueKind, String, String)>>,
    pub run_untils: Mutex<Vec<f64>>,
    pub step_count: Mutex<u64>,
    pub reject_writes: bool,
    pub time: f64,
    pub exited: bool,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetches(fetches: Vec<Result<Snapshot, ExError>>) -> Self {
        let backend = Self::new();
        *backend.fetches.lock().unwrap() = fetches.into();
        backend
    }

    pub fn with_snapshots(snapshots: Vec<Snapshot>) -> Self {
        Self::with_fetches(snapshots.into_iter().map(Ok).collect())
    }

    pub fn with_steps(self, steps: Vec<RunOutcome>) -> Self {
        *self.steps.lock().unwrap() = steps.into();
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn steps_taken(&self) -> u64 {
        *self.step_count.lock().unwrap()
    }
}

#[async_trait]
impl Fetch for ScriptedBackend {
    async fn fetch(&self, request: &FetchRequest) -> Result<Snapshot, ExError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut fetches = self.fetches.lock().unwrap();
        let next = if fetches.len() > 1 {
            fetches.pop_front()
        } else {
            fetches.front().cloned()
        };
        next.unwrap_or_else(|| {
            Err(ExError::new(ExErrorKind::FetchFailure).with_message("script exhausted"))
        })
    }
}

#[async_trait]
impl Control for ScriptedBackend {
    async fn set_state(&self, kind: ValueKind, path: &str, value: &str) -> Result<(), ExError> {
        if self.reject_writes {
            return Err(ExError::new(ExErrorKind::WriteRejected)
                .with_op("set_state")
                .with_path(path)
                .with_status(400));
        }
        self.writes
            .lock()
            .unwrap()
            .push((kind, path.to_string(), value.to_string()));
        Ok(())
    }

    async fn run_until(&self, time: f64) -> Result<(), ExError> {
        self.run_untils.lock().unwrap().push(time);
        Ok(())
    }

    async fn run_once(&self) -> Result<RunOutcome, ExError> {
        *self.step_count.lock().unwrap() += 1;
        Ok(self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(RunOutcome::Running))
    }

    async fn exited(&self) -> Result<bool, ExError> {
        Ok(self.exited)
    }

    async fn precision(&self) -> Result<usize, ExError> {
        Ok(3)
    }

    async fn time(&self) -> Result<f64, ExError> {
        Ok(self.time)
    }
}

#[allow(dead_code)]
pub fn log(time: f64, path: &str, level: LogLevel) -> LogEntry {
    LogEntry::new(time, path, level, format!("{path} at {time}"))
}

#[allow(dead_code)]
pub fn int(path: &str, value: i64) -> StateEntry {
    StateEntry::new(path, value)
}

#[allow(dead_code)]
pub fn text(path: &str, value: &str) -> StateEntry {
    StateEntry::new(path, value)
}

#[allow(dead_code)]
pub fn node(path: &str) -> ComponentNode {
    let name = path.rsplit('.').next().unwrap_or(path);
    ComponentNode::new(path, name)
}

#[allow(dead_code)]
pub fn fetch_failure() -> ExError {
    ExError::new(ExErrorKind::FetchFailure)
        .with_op("GET /state/**")
        .with_message("connection refused")
}
