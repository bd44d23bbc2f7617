//! Shared types for DRY compliance.

mod pagination;
mod response;

pub use pagination::{PaginatedResponse, PaginationMeta, PaginationParams, SortOrder};
pub use response::ApiResponse;
