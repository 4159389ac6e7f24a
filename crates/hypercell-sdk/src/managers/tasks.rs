// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Backend task resources.

use tracing::instrument;

use crate::client::ApiClient;
use crate::error::Result;
use crate::query::ListQuery;
use crate::resource::collection_items;
use crate::task::{BackendTask, TaskInfo};

/// Access to the backend's task collection.
pub struct TaskManager {
    api: ApiClient,
}

impl TaskManager {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch a single task snapshot.
    #[instrument(skip(self))]
    pub fn get(&self, task_id: &str) -> Result<TaskInfo> {
        let response = self.api.get(&format!("tasks/{task_id}"))?;
        Ok(serde_json::from_value(response.body)?)
    }

    /// List task snapshots.
    #[instrument(skip(self, query))]
    pub fn list(&self, query: &ListQuery) -> Result<Vec<TaskInfo>> {
        let response = self.api.get_with_query("tasks", &query.to_pairs())?;
        collection_items(&response.body)?
            .iter()
            .map(|item| Ok(serde_json::from_value(item.clone())?))
            .collect()
    }

    /// A waitable handle on a backend-issued task id.
    pub fn track(&self, task_id: impl Into<String>) -> BackendTask {
        BackendTask::new(self.api.clone(), task_id)
    }
}
