// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Hypercell SDK
//!
//! Client for the Hypercell HCI management API.
//!
//! The backend exposes a versioned REST API whose long-running operations
//! (create cluster, migrate network, upload image) answer with a task
//! handle instead of a final result. This crate provides the two pieces
//! that make such an API usable from one stable client surface:
//!
//! - **Task handles** with a uniform blocking wait contract over the
//!   backend's heterogeneous completion signals: backend task ids, status
//!   convergence, list-membership convergence, and chained multi-stage
//!   waits.
//! - **Version dispatch**: operations whose wire format changed across
//!   backend releases register one implementation per version interval and
//!   resolve against the bound API version on every call, including scoped
//!   per-call overrides.
//!
//! # Example
//!
//! ```no_run
//! use hypercell_sdk::{ClientConfig, CreateClusterOptions, HypercellClient, Task};
//!
//! # fn example() -> hypercell_sdk::Result<()> {
//! let client = HypercellClient::new(
//!     ClientConfig::new()
//!         .with_base_url("https://10.0.0.1:8800/api")
//!         .with_token("secret"),
//! )?;
//!
//! let options = CreateClusterOptions::new("prod")
//!     .with_nodes(vec!["node-1".into(), "node-2".into(), "node-3".into()])
//!     .with_replicas(3);
//! let mut task = client.clusters().create(&options)?;
//!
//! // Blocks until the backend finishes (or the budget elapses).
//! let cluster = task.wait(None)?;
//! println!("created cluster {}", cluster["id"]);
//! # Ok(())
//! # }
//! ```

mod binding;
mod client;
mod config;
mod dispatch;
mod error;
mod managers;
mod query;
mod resource;
mod task;
mod version;

pub use binding::{VersionBinding, VersionGuard};
pub use client::{ApiClient, ApiResponse, HypercellClient};
pub use config::ClientConfig;
pub use dispatch::{VersionMap, VersionRange, VersionedMethod};
pub use error::{Error, Result};
pub use managers::{
    ClusterManager, CreateClusterOptions, ImageManager, NetworkManager, NodeManager, TaskManager,
};
pub use query::{ListQuery, SortOrder, SortSpec};
pub use resource::{Resource, ResourceRef};
pub use task::{
    BackendTask, ChainedTask, CreationTask, DEFAULT_POLL_INTERVAL, DEFAULT_TASK_TIMEOUT,
    DeletionPollTask, PollState, PollTask, ResetStatePollTask, StatusPollTask, Task, TaskInfo,
    TaskState, VerifiedCreationTask,
};
pub use version::{ApiVersion, VersionPart};
