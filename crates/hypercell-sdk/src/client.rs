// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The hypercell client.

use std::sync::Arc;

use hypercell_http::{BearerAuth, Request, Transport, UreqTransport};
use serde_json::Value;
use tracing::debug;

use crate::binding::{VersionBinding, VersionGuard};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::managers::{ClusterManager, ImageManager, NetworkManager, NodeManager, TaskManager};
use crate::version::ApiVersion;

/// A decoded, checked API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    /// Backend request identifier, for log correlation.
    pub correlation_id: Option<String>,
}

/// Low-level versioned API handle.
///
/// Cheap to clone: the transport, version binding and configuration are
/// shared. Managers and tasks each hold their own clone, so a task can
/// outlive the manager method that created it.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    binding: Arc<VersionBinding>,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let binding = Arc::new(VersionBinding::new(config.api_version));
        Self {
            transport,
            binding,
            config: Arc::new(config),
        }
    }

    /// The API version dispatched calls currently resolve against.
    pub fn version(&self) -> ApiVersion {
        self.binding.current()
    }

    pub fn binding(&self) -> &Arc<VersionBinding> {
        &self.binding
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Request::get(self.url(path, &[])))
    }

    pub fn get_with_query(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        self.send(Request::get(self.url(path, query)))
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Request::post(self.url(path, &[])).with_body(body.clone()))
    }

    pub fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.send(Request::put(self.url(path, &[])).with_body(body.clone()))
    }

    pub fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Request::delete(self.url(path, &[])))
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    fn send(&self, request: Request) -> Result<ApiResponse> {
        let response = self.transport.send(&request)?;
        let correlation_id = response.correlation_id().map(str::to_string);
        debug!(
            status = response.status,
            correlation_id = correlation_id.as_deref().unwrap_or(""),
            "received response"
        );
        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            return Err(Error::Api {
                status: response.status,
                message,
                correlation_id,
            });
        }
        Ok(ApiResponse {
            status: response.status,
            body: response.body.unwrap_or(Value::Null),
            correlation_id,
        })
    }
}

/// High-level client for the Hypercell management API.
///
/// Construct one per backend, then use the manager accessors for the
/// resource domains. Long-running operations return task handles whose
/// `wait` blocks until the backend reaches a terminal outcome.
pub struct HypercellClient {
    api: ApiClient,
}

impl HypercellClient {
    /// Create a client with the native HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut transport = UreqTransport::new(config.connect_timeout, config.request_timeout);
        if let Some(token) = &config.token {
            transport = transport.with_auth(Box::new(BearerAuth::new(token)));
        }
        Ok(Self {
            api: ApiClient::new(config, Arc::new(transport)),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            api: ApiClient::new(config, transport),
        }
    }

    /// The API version the client currently resolves against.
    pub fn api_version(&self) -> ApiVersion {
        self.api.version()
    }

    /// Temporarily address a different API generation. The override lasts
    /// until the returned guard drops and applies to every call made
    /// through this client in between.
    pub fn scoped_version(&self, version: ApiVersion) -> VersionGuard {
        self.api.binding().scoped(version)
    }

    // =========================================================================
    // Manager accessors
    // =========================================================================

    pub fn tasks(&self) -> TaskManager {
        TaskManager::new(self.api.clone())
    }

    pub fn clusters(&self) -> ClusterManager {
        ClusterManager::new(self.api.clone())
    }

    pub fn nodes(&self) -> NodeManager {
        NodeManager::new(self.api.clone())
    }

    pub fn networks(&self) -> NetworkManager {
        NetworkManager::new(self.api.clone())
    }

    pub fn images(&self) -> ImageManager {
        ImageManager::new(self.api.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypercell_http::Response;
    use std::collections::HashMap;

    struct NullTransport;

    impl Transport for NullTransport {
        fn send(&self, _request: &Request) -> hypercell_http::Result<Response> {
            Ok(Response {
                status: 200,
                headers: HashMap::new(),
                body: None,
            })
        }
    }

    fn api() -> ApiClient {
        ApiClient::new(
            ClientConfig::default().with_base_url("http://hci.test/api/"),
            Arc::new(NullTransport),
        )
    }

    #[test]
    fn test_url_joins_base_and_path() {
        assert_eq!(api().url("/clusters/c1", &[]), "http://hci.test/api/clusters/c1");
        assert_eq!(api().url("clusters", &[]), "http://hci.test/api/clusters");
    }

    #[test]
    fn test_url_encodes_query_pairs() {
        let url = api().url(
            "clusters",
            &[
                ("status".to_string(), "active".to_string()),
                ("name".to_string(), "a b".to_string()),
            ],
        );
        assert_eq!(url, "http://hci.test/api/clusters?status=active&name=a%20b");
    }
}
