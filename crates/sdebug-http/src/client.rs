//! `reqwest` implementation of the engine capabilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use sdebug_core::errors::{ExError, SdebugError};
use sdebug_core::model::{ComponentNode, LogEntry, StateEntry, ValueKind};
use sdebug_engine::capability::{Control, Fetch, RunOutcome};
use sdebug_engine::projection::{FetchRequest, Snapshot};

use crate::routes;

/// Longest slice of an error body kept in an error message
const MAX_BODY_CHARS: usize = 200;

/// Acknowledgement `/run/once` sends when the simulation has finished
const EXITED_ACK: &str = "exited";

/// Where the simulation listens and how long to wait for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub server: String,
    pub port: u16,
    pub timeout_ms: u64,
}

impl HttpConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server: "127.0.0.1".to_string(),
            port: 9000,
            timeout_ms: 5000,
        }
    }
}

/// REST client for one simulation
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client with the configured request timeout
    ///
    /// # Errors
    ///
    /// `FetchFailure` if the underlying HTTP client can't be created.
    pub fn new(config: &HttpConfig) -> Result<Self, ExError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SdebugError::FetchFailed {
                operation: "build http client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdebugError> {
        let operation = format!("GET {}", path);
        tracing::debug!(operation = operation.as_str(), "sending request");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(&operation, &e))?;
        decode(&operation, response).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdebugError> {
        let operation = format!("POST {}", path);
        tracing::debug!(operation = operation.as_str(), "sending request");
        let response = self
            .http
            .post(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(&operation, &e))?;
        decode(&operation, response).await
    }
}

fn transport_error(operation: &str, err: &reqwest::Error) -> SdebugError {
    if err.is_timeout() {
        SdebugError::FetchTimedOut {
            operation: operation.to_string(),
        }
    } else {
        SdebugError::FetchFailed {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Check the status and decode a JSON body
async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, SdebugError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SdebugError::BackendStatus {
            operation: operation.to_string(),
            status: status.as_u16(),
            body: body.chars().take(MAX_BODY_CHARS).collect(),
        });
    }

    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            transport_error(operation, &e)
        } else {
            SdebugError::UndecodablePayload {
                operation: operation.to_string(),
                reason: e.to_string(),
            }
        }
    })
}

#[async_trait]
impl Fetch for HttpBackend {
    async fn fetch(&self, request: &FetchRequest) -> Result<Snapshot, ExError> {
        let path = routes::fetch_path(request);
        let snapshot = match request {
            FetchRequest::Log { .. } => Snapshot::Log(self.get::<Vec<LogEntry>>(&path).await?),
            FetchRequest::State { .. } => {
                Snapshot::State(self.get::<Vec<StateEntry>>(&path).await?)
            }
            FetchRequest::Components => Snapshot::Tree(self.get::<ComponentNode>(&path).await?),
            FetchRequest::Display => Snapshot::Map(self.get::<Vec<StateEntry>>(&path).await?),
        };
        Ok(snapshot)
    }
}

#[async_trait]
impl Control for HttpBackend {
    async fn set_state(&self, kind: ValueKind, path: &str, value: &str) -> Result<(), ExError> {
        let route = routes::write_path(kind, path, value);
        match self.post::<serde_json::Value>(&route).await {
            Ok(_) => Ok(()),
            Err(SdebugError::BackendStatus { status, body, .. }) => {
                let err: ExError = SdebugError::WriteRejected {
                    path: path.to_string(),
                    reason: body,
                }
                .into();
                Err(err.with_status(status))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn run_until(&self, time: f64) -> Result<(), ExError> {
        self.post::<serde_json::Value>(&routes::run_until_path(time))
            .await?;
        Ok(())
    }

    async fn run_once(&self) -> Result<RunOutcome, ExError> {
        let ack = self.post::<serde_json::Value>(routes::RUN_ONCE).await?;
        Ok(if ack.as_str() == Some(EXITED_ACK) {
            RunOutcome::Exited
        } else {
            RunOutcome::Running
        })
    }

    async fn exited(&self) -> Result<bool, ExError> {
        Ok(self.get::<bool>(routes::EXITED).await?)
    }

    async fn precision(&self) -> Result<usize, ExError> {
        Ok(self.get::<usize>(routes::PRECISION).await?)
    }

    async fn time(&self) -> Result<f64, ExError> {
        Ok(self.get::<f64>(routes::TIME).await?)
    }
}
