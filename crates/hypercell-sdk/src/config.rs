// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the hypercell client.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::version::ApiVersion;

/// Configuration for [`crate::HypercellClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the management API, e.g. `https://10.0.0.1:8800/api`.
    pub base_url: String,
    /// API version the client is bound to by default.
    pub api_version: ApiVersion,
    /// Bearer token for authentication, if the deployment requires one.
    pub token: Option<String>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Delay between successive poll attempts while waiting on a task.
    pub poll_interval: Duration,
    /// Default wall-clock budget for waiting on a task.
    pub task_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8800/api".to_string(),
            api_version: ApiVersion::new(3, 0, 0),
            token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
            task_timeout: Duration::from_secs(600),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HYPERCELL_API_URL`: Base URL (default: "http://127.0.0.1:8800/api")
    /// - `HYPERCELL_API_VERSION`: Bound API version (default: "3.0.0")
    /// - `HYPERCELL_API_TOKEN`: Bearer token (default: unset)
    /// - `HYPERCELL_CONNECT_TIMEOUT_MS`: Connection timeout in milliseconds (default: 10000)
    /// - `HYPERCELL_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HYPERCELL_API_URL") {
            config.base_url = url;
        }

        if let Ok(version) = std::env::var("HYPERCELL_API_VERSION") {
            config.api_version = version
                .parse()
                .map_err(|_| Error::Config(format!("invalid HYPERCELL_API_VERSION: {version}")))?;
        }

        if let Ok(token) = std::env::var("HYPERCELL_API_TOKEN") {
            config.token = Some(token);
        }

        if let Ok(value) = std::env::var("HYPERCELL_CONNECT_TIMEOUT_MS") {
            let ms: u64 = value
                .parse()
                .map_err(|_| Error::Config(format!("invalid HYPERCELL_CONNECT_TIMEOUT_MS: {value}")))?;
            config.connect_timeout = Duration::from_millis(ms);
        }

        if let Ok(value) = std::env::var("HYPERCELL_REQUEST_TIMEOUT_MS") {
            let ms: u64 = value
                .parse()
                .map_err(|_| Error::Config(format!("invalid HYPERCELL_REQUEST_TIMEOUT_MS: {value}")))?;
            config.request_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bound API version.
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the poll interval used while waiting on tasks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the default task wait budget.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8800/api");
        assert_eq!(config.api_version, ApiVersion::new(3, 0, 0));
        assert!(config.token.is_none());
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.task_timeout, Duration::from_secs(600));
    }

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new()
            .with_base_url("https://hci.example.test/api")
            .with_api_version(ApiVersion::new(2, 5, 0))
            .with_token("tok-1")
            .with_connect_timeout(Duration::from_secs(5))
            .with_request_timeout(Duration::from_secs(60))
            .with_poll_interval(Duration::from_millis(200))
            .with_task_timeout(Duration::from_secs(120));

        assert_eq!(config.base_url, "https://hci.example.test/api");
        assert_eq!(config.api_version, ApiVersion::new(2, 5, 0));
        assert_eq!(config.token.as_deref(), Some("tok-1"));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.poll_interval, Duration::from_millis(200));
        assert_eq!(config.task_timeout, Duration::from_secs(120));
    }
}
