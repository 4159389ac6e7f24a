// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for the HTTP transport layer.

use thiserror::Error;

/// Result type using HttpError.
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errors that can occur while exchanging a request with the backend.
///
/// Only I/O-level failures surface here. An HTTP error status is not a
/// transport failure and is returned as a regular [`crate::Response`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection or protocol-level failure.
    #[error("transport error: {0}")]
    Io(String),

    /// The request URL is not something the transport can send to.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The response body could not be read.
    #[error("response decode error: {0}")]
    Decode(String),
}
