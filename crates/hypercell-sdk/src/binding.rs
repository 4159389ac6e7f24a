// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The currently bound API version, with scoped overrides.
//!
//! A client addresses one API generation by default, but a single logical
//! operation sometimes has to issue a nested call against a different
//! generation. That is expressed as a scoped override: push a version, get
//! a guard, and the previous binding is restored when the guard drops,
//! including on early returns and panics.

use std::sync::{Arc, RwLock};

use crate::version::ApiVersion;

/// Stack of bound API versions. The bottom entry is the configured base
/// version and is never popped.
#[derive(Debug)]
pub struct VersionBinding {
    stack: RwLock<Vec<ApiVersion>>,
}

impl VersionBinding {
    pub fn new(base: ApiVersion) -> Self {
        Self {
            stack: RwLock::new(vec![base]),
        }
    }

    /// The version all dispatched calls currently resolve against.
    pub fn current(&self) -> ApiVersion {
        *self
            .stack
            .read()
            .expect("version stack lock poisoned")
            .last()
            .expect("version stack is never empty")
    }

    /// Temporarily bind `version`. The override lasts until the returned
    /// guard is dropped.
    pub fn scoped(self: &Arc<Self>, version: ApiVersion) -> VersionGuard {
        self.stack
            .write()
            .expect("version stack lock poisoned")
            .push(version);
        VersionGuard {
            binding: Arc::clone(self),
        }
    }
}

/// Restores the previous version binding on drop.
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct VersionGuard {
    binding: Arc<VersionBinding>,
}

impl Drop for VersionGuard {
    fn drop(&mut self) {
        let mut stack = self
            .binding
            .stack
            .write()
            .expect("version stack lock poisoned");
        if stack.len() > 1 {
            stack.pop();
        }
    }
}
