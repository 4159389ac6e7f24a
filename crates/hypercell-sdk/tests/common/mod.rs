// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared test fixtures: a scripted in-memory transport.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hypercell_http::{CORRELATION_HEADER, HttpError, Request, Response, Transport};
use hypercell_sdk::{ApiVersion, ClientConfig, HypercellClient};
use serde_json::Value;

/// Replays a scripted sequence of responses in order and records every
/// request it saw. Running out of script is a transport error, so a test
/// that polls more often than scripted fails loudly.
pub struct SequenceTransport {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl SequenceTransport {
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl Transport for SequenceTransport {
    fn send(&self, request: &Request) -> hypercell_http::Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::Io("no scripted response left".to_string()))
    }
}

pub fn ok(body: Value) -> Response {
    Response {
        status: 200,
        headers: HashMap::new(),
        body: Some(body),
    }
}

pub fn ok_with_correlation(body: Value, correlation_id: &str) -> Response {
    let mut response = ok(body);
    response
        .headers
        .insert(CORRELATION_HEADER.to_string(), correlation_id.to_string());
    response
}

pub fn error_status(status: u16, body: Value) -> Response {
    Response {
        status,
        headers: HashMap::new(),
        body: Some(body),
    }
}

/// Client over a scripted transport, with fast polling and a short default
/// task budget so tests never hang on a scripting mistake.
pub fn client(responses: Vec<Response>) -> (HypercellClient, Arc<SequenceTransport>) {
    client_at("3.0.0", responses)
}

pub fn client_at(version: &str, responses: Vec<Response>) -> (HypercellClient, Arc<SequenceTransport>) {
    let transport = Arc::new(SequenceTransport::new(responses));
    let config = ClientConfig::new()
        .with_base_url("http://hci.test/api")
        .with_api_version(version.parse::<ApiVersion>().unwrap())
        .with_poll_interval(Duration::from_millis(10))
        .with_task_timeout(Duration::from_secs(5));
    (
        HypercellClient::with_transport(config, transport.clone()),
        transport,
    )
}
