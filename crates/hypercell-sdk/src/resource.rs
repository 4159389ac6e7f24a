// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Value-backed resource snapshots.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A snapshot of a backend resource.
///
/// Resources are value-like: re-fetching produces a new snapshot, never a
/// mutation of a shared object. Fields are whatever the backend supplied;
/// typed accessors cover the common ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    properties: Map<String, Value>,
}

impl Resource {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(properties) => Ok(Self { properties }),
            other => Err(Error::UnexpectedResponse(format!(
                "expected resource object, got {other}"
            ))),
        }
    }

    /// Backend-assigned identifier.
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Current status field, when the resource reports one.
    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.field(name).and_then(Value::as_u64)
    }

    /// Round-trip to the equivalent mapping.
    pub fn to_value(&self) -> Value {
        Value::Object(self.properties.clone())
    }
}

/// Reference to a resource: either a raw identifier or a snapshot that
/// carries one. Public operations normalize this once at their boundary.
#[derive(Debug, Clone)]
pub enum ResourceRef {
    Id(String),
    Snapshot(Resource),
}

impl ResourceRef {
    /// The identifier this reference designates.
    pub fn id(&self) -> Result<&str> {
        match self {
            ResourceRef::Id(id) => Ok(id),
            ResourceRef::Snapshot(resource) => resource.id().ok_or_else(|| {
                Error::UnexpectedResponse("resource snapshot carries no id".to_string())
            }),
        }
    }
}

impl From<&str> for ResourceRef {
    fn from(id: &str) -> Self {
        ResourceRef::Id(id.to_string())
    }
}

impl From<String> for ResourceRef {
    fn from(id: String) -> Self {
        ResourceRef::Id(id)
    }
}

impl From<Resource> for ResourceRef {
    fn from(resource: Resource) -> Self {
        ResourceRef::Snapshot(resource)
    }
}

/// Items of a list response. The backend returns either a bare array or an
/// object wrapping it as `{"items": [...]}`.
pub(crate) fn collection_items(body: &Value) -> Result<&Vec<Value>> {
    body.as_array()
        .or_else(|| body.get("items").and_then(Value::as_array))
        .ok_or_else(|| Error::UnexpectedResponse("expected a resource collection".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trips_to_equivalent_mapping() {
        let value = json!({"id": "c1", "status": "active", "replicas": 3});
        let resource = Resource::from_value(value.clone()).unwrap();
        assert_eq!(resource.to_value(), value);
        assert_eq!(resource.id(), Some("c1"));
        assert_eq!(resource.status(), Some("active"));
        assert_eq!(resource.u64_field("replicas"), Some(3));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Resource::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_ref_normalization() {
        let by_id = ResourceRef::from("c1");
        assert_eq!(by_id.id().unwrap(), "c1");

        let snapshot = Resource::from_value(json!({"id": "c2"})).unwrap();
        let by_snapshot = ResourceRef::from(snapshot);
        assert_eq!(by_snapshot.id().unwrap(), "c2");

        let bare = Resource::from_value(json!({"status": "new"})).unwrap();
        assert!(ResourceRef::from(bare).id().is_err());
    }

    #[test]
    fn test_collection_items_accepts_both_shapes() {
        let bare = json!([{"id": "a"}]);
        assert_eq!(collection_items(&bare).unwrap().len(), 1);
        let wrapped = json!({"items": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(collection_items(&wrapped).unwrap().len(), 2);
        assert!(collection_items(&json!("nope")).is_err());
    }
}
