// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Cluster lifecycle.

use std::sync::OnceLock;

use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::dispatch::{VersionMap, VersionRange};
use crate::error::{Error, Result};
use crate::query::ListQuery;
use crate::resource::{Resource, ResourceRef, collection_items};
use crate::task::{BackendTask, CreationTask, DeletionPollTask};

/// Options for creating a cluster.
#[derive(Debug, Clone)]
pub struct CreateClusterOptions {
    pub name: String,
    pub node_ids: Vec<String>,
    pub replicas: u32,
}

impl CreateClusterOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_ids: Vec::new(),
            replicas: 2,
        }
    }

    pub fn with_nodes(mut self, node_ids: Vec<String>) -> Self {
        self.node_ids = node_ids;
        self
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }
}

type CreateClusterFn = fn(&ClusterManager, &CreateClusterOptions) -> Result<CreationTask>;

static CREATE_OPS: OnceLock<VersionMap<CreateClusterFn>> = OnceLock::new();

/// The cluster-create payload was restructured in API generation 3: the
/// 2.x wire format carries placement fields inline, 3.x nests them.
fn create_ops() -> &'static VersionMap<CreateClusterFn> {
    CREATE_OPS.get_or_init(|| {
        let mut ops = VersionMap::new();
        ops.register(
            "create_cluster",
            VersionRange::parse("2.0", "2.latest").expect("well-formed range"),
            create_v2 as CreateClusterFn,
        )
        .expect("disjoint registration");
        ops.register(
            "create_cluster",
            VersionRange::at_least("3.0").expect("well-formed range"),
            create_v3 as CreateClusterFn,
        )
        .expect("disjoint registration");
        ops
    })
}

fn create_v2(manager: &ClusterManager, options: &CreateClusterOptions) -> Result<CreationTask> {
    let body = json!({
        "name": options.name,
        "node_ids": options.node_ids,
        "replicas": options.replicas,
    });
    manager.submit_create(&body)
}

fn create_v3(manager: &ClusterManager, options: &CreateClusterOptions) -> Result<CreationTask> {
    let body = json!({
        "name": options.name,
        "placement": {
            "nodes": options.node_ids,
            "replicas": options.replicas,
        },
    });
    manager.submit_create(&body)
}

/// Cluster operations.
pub struct ClusterManager {
    api: ApiClient,
}

impl ClusterManager {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self, query))]
    pub fn list(&self, query: &ListQuery) -> Result<Vec<Resource>> {
        let response = self.api.get_with_query("clusters", &query.to_pairs())?;
        collection_items(&response.body)?
            .iter()
            .map(|item| Resource::from_value(item.clone()))
            .collect()
    }

    #[instrument(skip(self, cluster))]
    pub fn get(&self, cluster: &ResourceRef) -> Result<Resource> {
        let id = cluster.id()?;
        let response = self.api.get(&format!("clusters/{id}"))?;
        Resource::from_value(response.body)
    }

    /// Create a cluster. Resolves the wire format for the bound API
    /// version on every call.
    #[instrument(skip(self, options), fields(name = %options.name))]
    pub fn create(&self, options: &CreateClusterOptions) -> Result<CreationTask> {
        info!("Creating cluster");
        let imp = create_ops().resolve("create_cluster", &self.api.version())?;
        imp(self, options)
    }

    /// Delete a cluster. Completion is observed as the cluster vanishing
    /// from the list endpoint.
    #[instrument(skip(self, cluster))]
    pub fn delete(&self, cluster: &ResourceRef) -> Result<DeletionPollTask> {
        let id = cluster.id()?;
        info!(cluster_id = id, "Deleting cluster");
        self.api.delete(&format!("clusters/{id}"))?;
        Ok(DeletionPollTask::new(self.api.clone(), "clusters", id))
    }

    fn submit_create(&self, body: &Value) -> Result<CreationTask> {
        let response = self.api.post("clusters", body)?;
        let task_id = response
            .body
            .get("task_id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedResponse("create response carries no task_id".to_string())
            })?;
        let cluster_id = response
            .body
            .get("cluster_id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedResponse("create response carries no cluster_id".to_string())
            })?;
        Ok(CreationTask::new(
            BackendTask::new(self.api.clone(), task_id),
            self.api.clone(),
            Some(format!("clusters/{cluster_id}")),
        ))
    }
}
