// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Machine images.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::resource::{Resource, ResourceRef};
use crate::task::{BackendTask, VerifiedCreationTask};

/// Image operations.
pub struct ImageManager {
    api: ApiClient,
}

impl ImageManager {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self, image))]
    pub fn get(&self, image: &ResourceRef) -> Result<Resource> {
        let id = image.id()?;
        let response = self.api.get(&format!("images/{id}"))?;
        Resource::from_value(response.body)
    }

    /// Upload an image. The backend ingests the content through a task and
    /// reports the checksum it stored; the wait verifies that checksum
    /// against the one computed here before handing the image back.
    #[instrument(skip(self, name, content), fields(name = %name, size = content.len()))]
    pub fn upload(&self, name: &str, content: &[u8]) -> Result<VerifiedCreationTask> {
        let checksum = sha256_hex(content);
        info!("Uploading image");
        let body = json!({
            "name": name,
            "content": STANDARD.encode(content),
            "checksum": checksum,
        });
        let response = self.api.post("images", &body)?;
        let task_id = response
            .body
            .get("task_id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedResponse("upload response carries no task_id".to_string())
            })?;
        Ok(VerifiedCreationTask::new(
            BackendTask::new(self.api.clone(), task_id),
            checksum,
        ))
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
