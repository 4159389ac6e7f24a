// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The generic poll loop.

use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::task::{DEFAULT_POLL_INTERVAL, DEFAULT_TASK_TIMEOUT, Task};

/// Outcome of one poll attempt.
#[derive(Debug, Clone)]
pub enum PollState {
    /// Not terminal yet; the optional snapshot is recorded for diagnostics.
    Waiting(Option<Value>),
    /// Terminal success with the wait result.
    Done(Value),
}

/// A task that repeatedly runs a poll step until it produces a terminal
/// result or the wall-clock budget elapses.
///
/// The step reports [`PollState::Done`] on success, [`PollState::Waiting`]
/// to keep going, or an error to fail immediately. On timeout the raised
/// error carries the last recorded observation so callers can report what
/// the operation looked like when the client gave up.
pub struct PollTask {
    step: Box<dyn FnMut() -> Result<PollState> + Send>,
    interval: Duration,
    timeout: Duration,
    last_observed: Option<Value>,
}

impl PollTask {
    pub fn new(step: impl FnMut() -> Result<PollState> + Send + 'static) -> Self {
        Self {
            step: Box::new(step),
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TASK_TIMEOUT,
            last_observed: None,
        }
    }

    /// Override the delay between poll attempts.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the default wait budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Task for PollTask {
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
            match (self.step)()? {
                PollState::Done(value) => {
                    self.last_observed = Some(value.clone());
                    return Ok(value);
                }
                PollState::Waiting(snapshot) => {
                    if let Some(snapshot) = snapshot {
                        self.last_observed = Some(snapshot);
                    }
                }
            }
            thread::sleep(self.interval);
        }
    }

    fn snapshot(&self) -> Option<Value> {
        self.last_observed.clone()
    }
}
