// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for the hypercell SDK.

use hypercell_http::HttpError;
use serde_json::Value;
use thiserror::Error;

/// Result type using the SDK error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed API version string.
    #[error("invalid API version: {0}")]
    VersionFormat(String),

    /// Malformed sort or filter argument.
    #[error("invalid query argument: {0}")]
    InvalidQuery(String),

    /// No registered implementation covers the active API version.
    #[error("operation {operation} is not available for API version {version}")]
    DispatchMiss { operation: String, version: String },

    /// Two registrations for the same operation cover overlapping versions.
    #[error("conflicting version ranges registered for operation {operation}")]
    DispatchConflict { operation: String },

    /// The backend reported a terminal failure for an asynchronous task.
    #[error("backend task failed: {message}")]
    TaskFailed {
        message: String,
        /// Request identifier of the response that reported the failure.
        correlation_id: Option<String>,
    },

    /// The backend reported a state outside the contractual vocabulary.
    #[error("backend task {task_id} reported unknown state {state:?}")]
    UnknownTaskState {
        task_id: String,
        state: String,
        correlation_id: Option<String>,
    },

    /// A polled resource entered an error status.
    #[error("resource entered error status {status}")]
    ResourceError {
        status: String,
        /// Snapshot of the resource that reported the status.
        resource: Value,
    },

    /// The wall-clock budget elapsed with no terminal result. Distinct from
    /// a definite failure: the operation may still succeed given more time.
    #[error("timed out after {waited_ms}ms waiting for completion")]
    Timeout {
        waited_ms: u64,
        /// Most recent poll observation, `None` when nothing was observed.
        last_observed: Option<Value>,
    },

    /// Post-creation content verification failed.
    #[error("content verification failed: expected checksum {expected}, got {actual}")]
    Verification { expected: String, actual: String },

    /// The backend rejected a synchronous request.
    #[error("API error [{status}]: {message}")]
    Api {
        status: u16,
        message: String,
        correlation_id: Option<String>,
    },

    /// The response shape did not match the wire contract.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection-level failure, propagated unchanged from the transport.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
}

impl Error {
    /// Whether this error is a client-side timeout judgment rather than a
    /// backend-reported outcome. Callers can suggest waiting longer.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Request identifier attached to the failure, when the backend
    /// supplied one.
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Error::TaskFailed { correlation_id, .. }
            | Error::UnknownTaskState { correlation_id, .. }
            | Error::Api { correlation_id, .. } => correlation_id.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
