// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Version-sensitive operation dispatch.
//!
//! The backend wire protocol changes across releases (URL shapes, payload
//! fields, semantics) while callers want one stable method name. Each
//! version-sensitive operation registers one implementation per supported
//! version interval; the registry picks the implementation whose interval
//! contains the version bound at call time. Registries are populated at
//! startup and read-only afterwards, so concurrent reads are safe.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::version::ApiVersion;

/// Inclusive interval of API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub start: ApiVersion,
    pub end: ApiVersion,
}

impl VersionRange {
    pub fn new(start: ApiVersion, end: ApiVersion) -> Self {
        Self { start, end }
    }

    /// Build a range from possibly partial version strings. The start is
    /// padded downwards (`"2.0"` means `2.0.0`) and the end upwards
    /// (`"2.0"` means `2.0.latest`), matching how declarations read:
    /// `parse("2.0", "3.0")` covers everything from 2.0.0 through
    /// 3.0.latest.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: ApiVersion::parse_with_default(start, "0")?,
            end: ApiVersion::parse_with_default(end, "latest")?,
        })
    }

    /// Open-ended range: `start` and above.
    pub fn at_least(start: &str) -> Result<Self> {
        Ok(Self {
            start: ApiVersion::parse_with_default(start, "0")?,
            end: ApiVersion::LATEST,
        })
    }

    pub fn contains(&self, version: &ApiVersion) -> bool {
        self.start <= *version && *version <= self.end
    }

    pub fn overlaps(&self, other: &VersionRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// One registered implementation of a versioned operation.
#[derive(Debug)]
pub struct VersionedMethod<F> {
    pub range: VersionRange,
    imp: F,
}

/// Mapping from operation name to its registrations, in registration order.
///
/// Registering overlapping ranges for the same operation is a configuration
/// error: per-version implementations are meant to partition the supported
/// version space, and an overlap means two of them claim the same call.
#[derive(Debug, Default)]
pub struct VersionMap<F> {
    entries: HashMap<String, Vec<VersionedMethod<F>>>,
}

impl<F> VersionMap<F> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Append an implementation for `name` valid over `range`.
    pub fn register(&mut self, name: impl Into<String>, range: VersionRange, imp: F) -> Result<()> {
        let name = name.into();
        let methods = self.entries.entry(name.clone()).or_default();
        if methods.iter().any(|m| m.range.overlaps(&range)) {
            return Err(Error::DispatchConflict { operation: name });
        }
        methods.push(VersionedMethod { range, imp });
        Ok(())
    }

    /// Select the implementation of `name` for `version`.
    ///
    /// Resolution happens on every call: the bound version can change over
    /// a client's lifetime, so results are never cached. Registrations are
    /// scanned most-recently-registered first.
    pub fn resolve(&self, name: &str, version: &ApiVersion) -> Result<&F> {
        self.entries
            .get(name)
            .and_then(|methods| methods.iter().rev().find(|m| m.range.contains(version)))
            .map(|m| &m.imp)
            .ok_or_else(|| Error::DispatchMiss {
                operation: name.to_string(),
                version: version.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_parse_pads_ends_asymmetrically() {
        let range = VersionRange::parse("2.0", "3.0").unwrap();
        assert_eq!(range.start.to_string(), "2.0.0");
        assert_eq!(range.end.to_string(), "3.0.latest");
    }

    #[test]
    fn test_overlap_detection() {
        let a = VersionRange::parse("2.0", "3.0").unwrap();
        let b = VersionRange::parse("3.0.2", "4.0").unwrap();
        let c = VersionRange::at_least("3.1").unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
