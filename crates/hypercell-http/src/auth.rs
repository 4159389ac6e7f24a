// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Auth-header providers.
//!
//! Session and token management is outside the transport layer; all it
//! needs is "produce auth headers for a request".

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Produces authentication headers for outgoing requests.
pub trait AuthProvider: Send + Sync {
    fn headers(&self) -> Vec<(String, String)>;
}

/// Bearer-token authentication.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl AuthProvider for BearerAuth {
    fn headers(&self) -> Vec<(String, String)> {
        vec![(
            "authorization".to_string(),
            format!("Bearer {}", self.token),
        )]
    }
}

/// HTTP basic authentication.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl AuthProvider for BasicAuth {
    fn headers(&self) -> Vec<(String, String)> {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        vec![("authorization".to_string(), format!("Basic {encoded}"))]
    }
}
