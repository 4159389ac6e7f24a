// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The transport seam and its native ureq backend.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::auth::AuthProvider;
use crate::error::{HttpError, Result};
use crate::request::Request;
use crate::response::Response;

/// Synchronous "send a request, get a response" capability.
///
/// Implementations must be shareable across threads; the SDK hands out
/// cheap clones of an `Arc<dyn Transport>`.
pub trait Transport: Send + Sync {
    fn send(&self, request: &Request) -> Result<Response>;
}

/// Native blocking transport over a shared [`ureq::Agent`].
///
/// An HTTP error status (4xx/5xx) is returned as a normal [`Response`] with
/// the status preserved; only connection-level failures become errors.
pub struct UreqTransport {
    agent: ureq::Agent,
    auth: Option<Box<dyn AuthProvider>>,
}

impl UreqTransport {
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(request_timeout)
            .build();
        Self { agent, auth: None }
    }

    /// Attach an auth-header provider applied to every request.
    pub fn with_auth(mut self, auth: Box<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(HttpError::InvalidUrl(request.url.clone()));
        }

        let mut outgoing = self.agent.request(request.method.as_str(), &request.url);
        if let Some(auth) = &self.auth {
            for (name, value) in auth.headers() {
                outgoing = outgoing.set(&name, &value);
            }
        }
        for (name, value) in &request.headers {
            outgoing = outgoing.set(name, value);
        }

        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let result = match &request.body {
            Some(body) => outgoing.send_json(body),
            None => outgoing.call(),
        };
        let raw = match result {
            Ok(raw) => raw,
            Err(ureq::Error::Status(_, raw)) => raw,
            Err(err) => return Err(HttpError::Io(err.to_string())),
        };

        convert(raw)
    }
}

fn convert(raw: ureq::Response) -> Result<Response> {
    let status = raw.status();
    let mut headers = HashMap::new();
    for name in raw.headers_names() {
        if let Some(value) = raw.header(&name) {
            headers.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }
    let text = raw
        .into_string()
        .map_err(|err| HttpError::Decode(err.to_string()))?;
    let body = if text.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&text).ok()
    };

    Ok(Response {
        status,
        headers,
        body,
    })
}
