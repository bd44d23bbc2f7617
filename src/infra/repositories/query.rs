//! Query options understood by the in-memory store.
//!
//! Filters and sort keys address top-level fields by their JSON
//! (camelCase) name.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::types::{PaginationParams, SortOrder};

/// Value of a single entity field, as seen by filters and sorting
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Compare two values of compatible kinds.
    ///
    /// Integers and numbers compare numerically; any other mix of kinds
    /// is incomparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;

        match (self, other) {
            (Text(a), Text(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Number(a), Number(b)) => a.partial_cmp(b),
            (Integer(a), Number(b)) => (*a as f64).partial_cmp(b),
            (Number(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Strict equality used by `where` filters
    pub fn matches(&self, other: &FieldValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// Filter, sort and window applied by `find_all`.
///
/// Stages run in order: equality filters (ANDed), a single-key stable
/// sort, offset, limit. Each stage is skipped when unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub filters: Vec<(String, FieldValue)>,
    pub order_by: Option<(String, SortOrder)>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality condition
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sort by one field. Only one sort key is supported; a later call
    /// replaces the earlier key.
    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some((field.into(), order));
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Same filters and sort, without offset and limit
    pub fn unwindowed(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order_by: self.order_by.clone(),
            offset: None,
            limit: None,
        }
    }

    /// Sort taken from pagination parameters, if any were given
    pub fn sorted_by(self, params: &PaginationParams) -> Self {
        match &params.sort_by {
            Some(field) => self.order_by(field.clone(), params.sort_order.unwrap_or_default()),
            None => self,
        }
    }
}
