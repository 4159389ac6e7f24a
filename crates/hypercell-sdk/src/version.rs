// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! API version values.
//!
//! A backend version is a three-component `major.middle.minor` triple where
//! each component is either an integer or the sentinel `latest`, which
//! orders after every number. Versions are pure values with a total order;
//! all dispatch decisions are made by comparing them.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// One component of an [`ApiVersion`].
///
/// `Latest` is the "+infinity" sentinel: it compares greater than every
/// concrete number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionPart {
    Number(u32),
    Latest,
}

impl VersionPart {
    fn parse(value: &str) -> Result<Self> {
        if value == "latest" {
            return Ok(VersionPart::Latest);
        }
        value
            .parse::<u32>()
            .map(VersionPart::Number)
            .map_err(|_| Error::VersionFormat(value.to_string()))
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionPart::Number(n) => write!(f, "{n}"),
            VersionPart::Latest => write!(f, "latest"),
        }
    }
}

/// An immutable backend API version.
///
/// Ordering is lexicographic over `(major, middle, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    major: VersionPart,
    middle: VersionPart,
    minor: VersionPart,
}

impl ApiVersion {
    /// The open upper bound: `latest.latest.latest`.
    pub const LATEST: ApiVersion = ApiVersion {
        major: VersionPart::Latest,
        middle: VersionPart::Latest,
        minor: VersionPart::Latest,
    };

    pub fn new(major: u32, middle: u32, minor: u32) -> Self {
        Self {
            major: VersionPart::Number(major),
            middle: VersionPart::Number(middle),
            minor: VersionPart::Number(minor),
        }
    }

    /// Parse a possibly partial version, padding missing components with
    /// `fill` ("latest" or a number). `"4.5"` padded with `"latest"` becomes
    /// `4.5.latest`; padded with `"0"` it becomes `4.5.0`.
    pub fn parse_with_default(value: &str, fill: &str) -> Result<Self> {
        let fill = VersionPart::parse(fill)?;
        let parts: Vec<&str> = value.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(Error::VersionFormat(value.to_string()));
        }
        let mut components = [fill; 3];
        for (slot, part) in components.iter_mut().zip(parts.iter()) {
            *slot = VersionPart::parse(part)?;
        }
        Ok(Self {
            major: components[0],
            middle: components[1],
            minor: components[2],
        })
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() != 3 {
            return Err(Error::VersionFormat(value.to_string()));
        }
        Ok(Self {
            major: VersionPart::parse(parts[0])?,
            middle: VersionPart::parse(parts[1])?,
            minor: VersionPart::parse(parts[2])?,
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.middle, self.minor)
    }
}

impl PartialEq<str> for ApiVersion {
    fn eq(&self, other: &str) -> bool {
        other.parse::<ApiVersion>().is_ok_and(|v| *self == v)
    }
}

impl PartialEq<&str> for ApiVersion {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd<str> for ApiVersion {
    fn partial_cmp(&self, other: &str) -> Option<std::cmp::Ordering> {
        other.parse::<ApiVersion>().ok().map(|v| self.cmp(&v))
    }
}

impl PartialOrd<&str> for ApiVersion {
    fn partial_cmp(&self, other: &&str) -> Option<std::cmp::Ordering> {
        self.partial_cmp(*other)
    }
}
