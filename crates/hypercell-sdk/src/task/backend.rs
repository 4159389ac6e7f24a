// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Waiting on backend-issued task handles.

use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::task::Task;

/// Backend task states.
///
/// This vocabulary is contractual: the strings are exact, case-sensitive
/// and closed. An unrecognized value signals a client/backend version
/// mismatch and is surfaced as an error, never skipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Scheduled,
    Running,
    Cancelling,
    Success,
    Failed,
    Aborted,
    Cancelled,
}

impl TaskState {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(TaskState::Scheduled),
            "running" => Some(TaskState::Running),
            "cancelling" => Some(TaskState::Cancelling),
            "success" => Some(TaskState::Success),
            "failed" => Some(TaskState::Failed),
            "aborted" => Some(TaskState::Aborted),
            "cancelled" => Some(TaskState::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Scheduled => "scheduled",
            TaskState::Running => "running",
            TaskState::Cancelling => "cancelling",
            TaskState::Success => "success",
            TaskState::Failed => "failed",
            TaskState::Aborted => "aborted",
            TaskState::Cancelled => "cancelled",
        }
    }

    /// Whether the backend will never report another state for this task.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Success | TaskState::Failed | TaskState::Aborted | TaskState::Cancelled
        )
    }
}

/// Snapshot of a backend task resource (`GET tasks/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Backend-assigned task id.
    pub id: String,
    /// Raw state string as reported by the backend.
    pub state: String,
    /// Failure details, when the backend supplied any.
    #[serde(default)]
    pub details: Option<String>,
    /// Result payload, present once the task succeeded.
    #[serde(default)]
    pub result: Option<Value>,
    /// When the backend started executing the task.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the task reached a terminal state.
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

/// A handle on a backend-issued asynchronous job.
///
/// Waiting queries the backend task resource on a fixed one-second delay
/// until its state lands in a terminal bucket.
pub struct BackendTask {
    api: ApiClient,
    task_id: String,
    interval: Duration,
    timeout: Duration,
    last_observed: Option<Value>,
}

impl BackendTask {
    pub fn new(api: ApiClient, task_id: impl Into<String>) -> Self {
        let timeout = api.config().task_timeout;
        Self {
            api,
            task_id: task_id.into(),
            interval: Duration::from_secs(1),
            timeout,
            last_observed: None,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Override the default wait budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn fetch(&self) -> Result<(TaskInfo, Option<String>)> {
        let response = self.api.get(&format!("tasks/{}", self.task_id))?;
        let info: TaskInfo = serde_json::from_value(response.body)?;
        Ok((info, response.correlation_id))
    }
}

impl Task for BackendTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        let budget = timeout.unwrap_or(self.timeout);
        let started = Instant::now();
        loop {
            if started.elapsed() >= budget {
                return Err(Error::Timeout {
                    waited_ms: budget.as_millis() as u64,
                    last_observed: self.last_observed.clone(),
                });
            }

            let (info, correlation_id) = self.fetch()?;
            self.last_observed = Some(serde_json::to_value(&info)?);

            let state = TaskState::parse(&info.state).ok_or_else(|| Error::UnknownTaskState {
                task_id: self.task_id.clone(),
                state: info.state.clone(),
                correlation_id: correlation_id.clone(),
            })?;
            debug!(task_id = %self.task_id, state = state.as_str(), "observed task state");

            match state {
                TaskState::Scheduled | TaskState::Running | TaskState::Cancelling => {}
                TaskState::Success => {
                    if let Some(messages) = sub_errors(info.result.as_ref()) {
                        return Err(Error::TaskFailed {
                            message: messages.join(", "),
                            correlation_id,
                        });
                    }
                    return Ok(info.result.unwrap_or(Value::Null));
                }
                TaskState::Failed => {
                    let message = info
                        .details
                        .filter(|details| !details.is_empty())
                        .unwrap_or_else(|| "internal error".to_string());
                    return Err(Error::TaskFailed {
                        message,
                        correlation_id,
                    });
                }
                TaskState::Aborted | TaskState::Cancelled => {
                    return Err(Error::TaskFailed {
                        message: format!("task {} was {}", self.task_id, state.as_str()),
                        correlation_id,
                    });
                }
            }

            thread::sleep(self.interval);
        }
    }

    fn snapshot(&self) -> Option<Value> {
        self.last_observed.clone()
    }
}

/// A task that reports `success` can still carry per-suboperation errors in
/// its result payload; those make the wait fail.
fn sub_errors(result: Option<&Value>) -> Option<Vec<String>> {
    let errors = result?.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("internal error")
                    .to_string()
            })
            .collect(),
    )
}
