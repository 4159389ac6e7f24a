// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! List-query arguments: filters, sorting, pagination.

use crate::error::{Error, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// A validated sort argument: `"field"`, `"field:asc"` or `"field:desc"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn parse(value: &str) -> Result<Self> {
        let (field, order) = match value.split_once(':') {
            None => (value, SortOrder::Ascending),
            Some((field, "asc")) => (field, SortOrder::Ascending),
            Some((field, "desc")) => (field, SortOrder::Descending),
            Some(_) => return Err(Error::InvalidQuery(value.to_string())),
        };
        if field.is_empty()
            || !field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::InvalidQuery(value.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            order,
        })
    }

    fn render(&self) -> String {
        format!("{}:{}", self.field, self.order.as_str())
    }
}

/// Query arguments for list operations.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    sort: Option<SortSpec>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on an exact field value.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Sort by the given spec; malformed input fails immediately.
    pub fn sort(mut self, spec: &str) -> Result<Self> {
        self.sort = Some(SortSpec::parse(spec)?);
        Ok(self)
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render to URL query pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.render()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}
