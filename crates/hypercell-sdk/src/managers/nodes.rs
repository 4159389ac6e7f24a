// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Node operations.

use serde_json::json;
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::ListQuery;
use crate::resource::{Resource, ResourceRef, collection_items};
use crate::task::{ResetStatePollTask, StatusPollTask};

/// Node operations.
pub struct NodeManager {
    api: ApiClient,
}

impl NodeManager {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self, query))]
    pub fn list(&self, query: &ListQuery) -> Result<Vec<Resource>> {
        let response = self.api.get_with_query("nodes", &query.to_pairs())?;
        collection_items(&response.body)?
            .iter()
            .map(|item| Resource::from_value(item.clone()))
            .collect()
    }

    #[instrument(skip(self, node))]
    pub fn get(&self, node: &ResourceRef) -> Result<Resource> {
        let id = node.id()?;
        let response = self.api.get(&format!("nodes/{id}"))?;
        Resource::from_value(response.body)
    }

    /// Put a node into maintenance. The backend drains workloads in the
    /// background; completion is the node's status converging to
    /// `maintenance`.
    #[instrument(skip(self, node))]
    pub fn set_maintenance(&self, node: &ResourceRef) -> Result<StatusPollTask> {
        let id = node.id()?;
        info!(node_id = id, "Entering maintenance");
        self.api.post(&format!("nodes/{id}/maintenance"), &json!({}))?;
        Ok(StatusPollTask::new(
            self.api.clone(),
            format!("nodes/{id}"),
            "maintenance",
        ))
    }

    /// Reset a node's state. `expect_error` requests a reset *into* the
    /// `ERROR` state (used to mark a node bad for replacement); otherwise
    /// the reset clears it.
    #[instrument(skip(self, node))]
    pub fn reset(&self, node: &ResourceRef, expect_error: bool) -> Result<ResetStatePollTask> {
        let id = node.id()?;
        info!(node_id = id, expect_error, "Resetting node state");
        self.api
            .post(&format!("nodes/{id}/reset"), &json!({"to_error": expect_error}))?;
        Ok(ResetStatePollTask::new(
            self.api.clone(),
            format!("nodes/{id}"),
            expect_error,
        ))
    }
}
