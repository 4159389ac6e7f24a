// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Asynchronous-operation handles.
//!
//! Long-running backend operations do not answer with a final result; they
//! answer with something to wait on: a backend task id, a resource whose
//! status will converge, a list a resource will disappear from. Each of
//! those completion signals gets a task type here, and all of them share
//! one waiting contract: [`Task`].
//!
//! Waiting is synchronous and blocking. The calling thread sleeps between
//! poll attempts; timeouts are cooperative and take effect at the next poll
//! boundary.

mod backend;
mod chain;
mod converge;
mod create;
mod poll;

pub use backend::{BackendTask, TaskInfo, TaskState};
pub use chain::ChainedTask;
pub use converge::{DeletionPollTask, ResetStatePollTask, StatusPollTask};
pub use create::{CreationTask, VerifiedCreationTask};
pub use poll::{PollState, PollTask};

use std::time::Duration;

use serde_json::Value;

use crate::error::Result;

/// Delay between successive poll attempts unless a task overrides it.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Wall-clock wait budget unless the caller overrides it.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(600);

/// A pending asynchronous backend operation.
///
/// A task is consumed by a single `wait` call; the outcome of waiting again
/// after completion is unspecified. `snapshot` may be consulted at any time
/// for diagnostics and performs no I/O.
pub trait Task: Send {
    /// Block until the operation reaches a terminal outcome or the budget
    /// elapses. `None` uses the task's default budget. The budget is
    /// measured from this call, not from task creation.
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Value>;

    /// The most recent observation, for diagnostics. `None` when nothing
    /// has been observed yet.
    fn snapshot(&self) -> Option<Value>;
}
