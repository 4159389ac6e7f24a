// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Running sub-tasks in sequence against a shared budget.

use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::Result;
use crate::task::{DEFAULT_TASK_TIMEOUT, Task};

/// An ordered sequence of sub-tasks behind a single wait.
///
/// Sub-tasks run strictly in declaration order, each against whatever
/// remains of the shared budget. A drained budget is still handed to the
/// next sub-task, which then fails with a timeout; steps are never
/// silently skipped. The wait result is the overarching resource given at
/// construction; per-step results are kept in order for callers that need
/// them.
pub struct ChainedTask {
    tasks: Vec<Box<dyn Task>>,
    resource: Value,
    results: Vec<Value>,
    timeout: Duration,
}

impl ChainedTask {
    pub fn new(resource: Value, tasks: Vec<Box<dyn Task>>) -> Self {
        Self {
            tasks,
            resource,
            results: Vec::new(),
            timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    /// Override the shared budget used when `wait` is called without one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The overarching resource this chain settles.
    pub fn resource(&self) -> &Value {
        &self.resource
    }

    /// Results of the sub-tasks completed so far, in declaration order.
    pub fn results(&self) -> &[Value] {
        &self.results
    }
}

impl Task for ChainedTask {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value> {
        let budget = timeout.unwrap_or(self.timeout);
        let started = Instant::now();
        for task in &mut self.tasks {
            let remaining = budget.saturating_sub(started.elapsed());
            let result = task.wait(Some(remaining))?;
            self.results.push(result);
        }
        Ok(self.resource.clone())
    }

    fn snapshot(&self) -> Option<Value> {
        self.tasks
            .iter()
            .rev()
            .find_map(|task| task.snapshot())
            .or_else(|| self.results.last().cloned())
    }
}
