// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Response model for the transport layer.

use std::collections::HashMap;

use serde_json::Value;

/// Header the backend echoes on every response for cross-system log
/// correlation.
pub const CORRELATION_HEADER: &str = "x-request-id";

/// A decoded HTTP response.
///
/// Header names are stored lower-cased. The body is `None` when the backend
/// returned an empty or non-JSON payload.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl Response {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The backend request identifier, when the backend supplied one.
    pub fn correlation_id(&self) -> Option<&str> {
        self.header(CORRELATION_HEADER)
    }

    /// Best-effort extraction of a human-readable error message from the
    /// body. The backend wraps errors as `{"error": {"message": ...}}`;
    /// older revisions used a bare `{"message": ...}`.
    pub fn error_message(&self) -> Option<String> {
        let body = self.body.as_ref()?;
        body.get("error")
            .and_then(|e| e.get("message"))
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(status: u16, body: Option<Value>) -> Response {
        let mut headers = HashMap::new();
        headers.insert(CORRELATION_HEADER.to_string(), "req-7".to_string());
        Response {
            status,
            headers,
            body,
        }
    }

    #[test]
    fn test_is_success() {
        assert!(response_with(200, None).is_success());
        assert!(response_with(204, None).is_success());
        assert!(!response_with(404, None).is_success());
        assert!(!response_with(500, None).is_success());
    }

    #[test]
    fn test_correlation_id() {
        assert_eq!(response_with(200, None).correlation_id(), Some("req-7"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = response_with(200, None);
        assert_eq!(response.header("X-Request-Id"), Some("req-7"));
    }

    #[test]
    fn test_error_message_nested() {
        let response = response_with(
            409,
            Some(serde_json::json!({"error": {"message": "cluster exists"}})),
        );
        assert_eq!(response.error_message(), Some("cluster exists".to_string()));
    }

    #[test]
    fn test_error_message_flat() {
        let response = response_with(400, Some(serde_json::json!({"message": "bad request"})));
        assert_eq!(response.error_message(), Some("bad request".to_string()));
    }

    #[test]
    fn test_error_message_absent() {
        assert_eq!(response_with(500, None).error_message(), None);
    }
}
