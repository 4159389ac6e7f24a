// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Creation tasks: a backend task plus a finishing step.

use std::time::Duration;

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::task::backend::BackendTask;
use crate::task::Task;

/// Waits on a backend creation task, then produces the created object.
///
/// Creation calls intentionally answer with a partial payload (typically
/// just identifiers); when a re-fetch path is supplied, the full object is
/// fetched once the backend task resolves.
pub struct CreationTask {
    inner: BackendTask,
    api: ApiClient,
    refetch_path: Option<String>,
}

impl CreationTask {
    pub fn new(inner: BackendTask, api: ApiClient, refetch_path: Option<String>) -> Self {
        Self {
            inner,
            api,
            refetch_path,
        }
    }

    pub fn task_id(&self) -> &str {
        self.inner.task_id()
    }
}

impl std::fmt::Debug for CreationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreationTask")
            .field("task_id", &self.inner.task_id())
            .field("refetch_path", &self.refetch_path)
            .finish()
    }
}

impl Task for CreationTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        let result = self.inner.wait(timeout)?;
        match &self.refetch_path {
            Some(path) => Ok(self.api.get(path)?.body),
            None => Ok(result),
        }
    }

    fn snapshot(&self) -> Option<Value> {
        self.inner.snapshot()
    }
}

/// Waits on a backend creation task and verifies the reported content
/// checksum against an expected value computed client-side.
pub struct VerifiedCreationTask {
    inner: BackendTask,
    expected_checksum: String,
}

impl VerifiedCreationTask {
    pub fn new(inner: BackendTask, expected_checksum: impl Into<String>) -> Self {
        Self {
            inner,
            expected_checksum: expected_checksum.into(),
        }
    }

    pub fn task_id(&self) -> &str {
        self.inner.task_id()
    }
}

impl Task for VerifiedCreationTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        let result = self.inner.wait(timeout)?;
        let actual = result
            .get("checksum")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedResponse("task result carries no checksum".to_string())
            })?;
        if actual != self.expected_checksum {
            return Err(Error::Verification {
                expected: self.expected_checksum.clone(),
                actual: actual.to_string(),
            });
        }
        Ok(result)
    }

    fn snapshot(&self) -> Option<Value> {
        self.inner.snapshot()
    }
}
