// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Network operations.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::resource::{Resource, ResourceRef};
use crate::task::{BackendTask, ChainedTask, PollState, PollTask, StatusPollTask, Task};

/// Poll interval for infrastructure-level migrations; these take minutes,
/// so the usual one-second cadence only generates load.
const MIGRATION_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Network operations.
pub struct NetworkManager {
    api: ApiClient,
}

impl NetworkManager {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self, network))]
    pub fn get(&self, network: &ResourceRef) -> Result<Resource> {
        let id = network.id()?;
        let response = self.api.get(&format!("networks/{id}"))?;
        Resource::from_value(response.body)
    }

    /// Migrate a network to another node.
    ///
    /// The network resource exposes a transition counter; a poll that
    /// observes no counter increase is a stale read and must not be taken
    /// for a state change, even if surface fields look different.
    #[instrument(skip(self, network))]
    pub fn migrate(&self, network: &ResourceRef, target_node: &str) -> Result<PollTask> {
        let id = network.id()?.to_string();
        let path = format!("networks/{id}");

        let baseline = transition_count(&self.api.get(&path)?.body);
        info!(network_id = %id, target_node, "Migrating network");
        self.api
            .post(&format!("networks/{id}/migrate"), &json!({"target": target_node}))?;

        let api = self.api.clone();
        let timeout = self.api.config().task_timeout;
        let mut last_count = baseline;
        let step = move || -> Result<PollState> {
            let response = api.get(&path)?;
            let count = transition_count(&response.body);
            if count <= last_count {
                return Ok(PollState::Waiting(None));
            }
            last_count = count;
            let resource = Resource::from_value(response.body)?;
            let status = resource.status().unwrap_or_default().to_string();
            if status.to_ascii_lowercase().starts_with("error") {
                return Err(Error::ResourceError {
                    status,
                    resource: resource.to_value(),
                });
            }
            if status == "active" {
                Ok(PollState::Done(resource.to_value()))
            } else {
                Ok(PollState::Waiting(Some(resource.to_value())))
            }
        };
        Ok(PollTask::new(step)
            .with_interval(MIGRATION_POLL_INTERVAL)
            .with_timeout(timeout))
    }

    /// Replace a network's load-balancer pool.
    ///
    /// The backend applies the pool through a task and the network then
    /// re-converges; both waits run in sequence under one budget. The
    /// chain's first sub-result is the applied pool snapshot for callers
    /// that need it.
    #[instrument(skip(self, network, pool))]
    pub fn update_pool(&self, network: &ResourceRef, pool: &Value) -> Result<ChainedTask> {
        let id = network.id()?;
        info!(network_id = id, "Updating load-balancer pool");
        let response = self.api.put(&format!("networks/{id}/pool"), pool)?;
        let task_id = response
            .body
            .get("task_id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedResponse("pool update response carries no task_id".to_string())
            })?;

        let backend = BackendTask::new(self.api.clone(), task_id);
        let converge = StatusPollTask::new(self.api.clone(), format!("networks/{id}"), "active");
        let overarching = response.body.get("pool").cloned().unwrap_or(Value::Null);
        Ok(ChainedTask::new(
            overarching,
            vec![Box::new(backend) as Box<dyn Task>, Box::new(converge)],
        ))
    }
}

fn transition_count(body: &Value) -> u64 {
    body.get("transition_count").and_then(Value::as_u64).unwrap_or(0)
}
