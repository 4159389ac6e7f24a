// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Convergence tasks: waiting for a resource to reach a state, or to be
//! gone.

use std::time::Duration;

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::resource::{Resource, collection_items};
use crate::task::poll::{PollState, PollTask};
use crate::task::Task;

const ERROR_SENTINEL: &str = "ERROR";

/// Polls a resource until its status equals the expected target.
///
/// Any status that case-insensitively begins with `error` fails the wait
/// immediately, regardless of the target: the resource will not converge
/// on its own from there.
pub struct StatusPollTask {
    inner: PollTask,
}

impl StatusPollTask {
    pub fn new(api: ApiClient, path: impl Into<String>, target: impl Into<String>) -> Self {
        let interval = api.config().poll_interval;
        let timeout = api.config().task_timeout;
        let path = path.into();
        let target = target.into();
        let step = move || -> Result<PollState> {
            let response = api.get(&path)?;
            let resource = Resource::from_value(response.body)?;
            let status = resource.status().unwrap_or_default().to_string();
            if status.to_ascii_lowercase().starts_with("error") {
                return Err(Error::ResourceError {
                    status,
                    resource: resource.to_value(),
                });
            }
            if status == target {
                Ok(PollState::Done(resource.to_value()))
            } else {
                Ok(PollState::Waiting(Some(resource.to_value())))
            }
        };
        Self {
            inner: PollTask::new(step).with_interval(interval).with_timeout(timeout),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.with_interval(interval);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }
}

impl Task for StatusPollTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        self.inner.wait(timeout)
    }

    fn snapshot(&self) -> Option<Value> {
        self.inner.snapshot()
    }
}

/// Convergence for reset-state operations.
///
/// Landing in `ERROR` can itself be the requested outcome, so this task
/// succeeds exactly when the resource's error-ness matches the intended
/// error-ness, instead of treating `ERROR` as a failure.
pub struct ResetStatePollTask {
    inner: PollTask,
}

impl ResetStatePollTask {
    pub fn new(api: ApiClient, path: impl Into<String>, expect_error: bool) -> Self {
        let interval = api.config().poll_interval;
        let timeout = api.config().task_timeout;
        let path = path.into();
        let step = move || -> Result<PollState> {
            let response = api.get(&path)?;
            let resource = Resource::from_value(response.body)?;
            let is_error = resource.status() == Some(ERROR_SENTINEL);
            if is_error == expect_error {
                Ok(PollState::Done(resource.to_value()))
            } else {
                Ok(PollState::Waiting(Some(resource.to_value())))
            }
        };
        Self {
            inner: PollTask::new(step).with_interval(interval).with_timeout(timeout),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.with_interval(interval);
        self
    }
}

impl Task for ResetStatePollTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        self.inner.wait(timeout)
    }

    fn snapshot(&self) -> Option<Value> {
        self.inner.snapshot()
    }
}

/// Polls a list endpoint until the watched id is no longer a member.
///
/// Absence is the only terminal signal a list exposes, so this task either
/// succeeds, times out, or propagates a transport error from the list call
/// unchanged; there is no observable failure state.
pub struct DeletionPollTask {
    inner: PollTask,
}

impl DeletionPollTask {
    pub fn new(api: ApiClient, collection: impl Into<String>, id: impl Into<String>) -> Self {
        let interval = api.config().poll_interval;
        let timeout = api.config().task_timeout;
        let collection = collection.into();
        let id = id.into();
        let step = move || -> Result<PollState> {
            let response = api.get(&collection)?;
            let items = collection_items(&response.body)?;
            let lingering = items
                .iter()
                .find(|item| item.get("id").and_then(Value::as_str) == Some(id.as_str()));
            match lingering {
                Some(item) => Ok(PollState::Waiting(Some(item.clone()))),
                None => Ok(PollState::Done(Value::Null)),
            }
        };
        Self {
            inner: PollTask::new(step).with_interval(interval).with_timeout(timeout),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.inner = self.inner.with_interval(interval);
        self
    }
}

impl Task for DeletionPollTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        self.inner.wait(timeout)
    }

    fn snapshot(&self) -> Option<Value> {
        self.inner.snapshot()
    }
}
