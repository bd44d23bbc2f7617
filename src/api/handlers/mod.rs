//! HTTP request handlers.
//!
//! Handlers pass the service envelope through unchanged and only pick
//! the status code.

pub mod product_handler;
pub mod stats_handler;
pub mod user_handler;

use axum::{http::StatusCode, response::Json};
use serde::Serialize;

use crate::types::ApiResponse;

pub use product_handler::product_routes;
pub use stats_handler::dashboard_stats;
pub use user_handler::user_routes;

/// Status for a service envelope: `ok` on success, 404 when the failure
/// is `not_found`, 400 for any other failure.
pub(crate) fn reply<T: Serialize>(
    response: ApiResponse<T>,
    ok: StatusCode,
    not_found: &str,
) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = if response.success {
        ok
    } else if response.failed_with(not_found) {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(response))
}
