//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Pagination parameters (page is 1-indexed).
///
/// Page and limit are taken as given; out-of-range pages yield an empty
/// page with correct totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl PaginationParams {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn sorted(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, limit: u64, total: u64) -> Self {
        let pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            data,
            pagination: PaginationMeta {
                page,
                limit,
                total,
                pages,
            },
        }
    }
}
