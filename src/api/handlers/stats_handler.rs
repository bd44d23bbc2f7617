//! Dashboard statistics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::types::ApiResponse;

/// Record counts shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_products: u64,
    /// Available products at or below the configured low-stock threshold
    pub low_stock_products: u64,
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard counts", body = DashboardStats),
        (status = 500, description = "Counts unavailable")
    )
)]
pub async fn dashboard_stats(State(state): State<AppState>) -> Response {
    let users = state.user_service.get_user_counts().await;
    let products = state
        .product_service
        .get_inventory_counts(state.config.low_stock_threshold)
        .await;

    match (users.data, products.data) {
        (Some(users), Some(products)) => {
            let stats = DashboardStats {
                total_users: users.total,
                active_users: users.active,
                total_products: products.total,
                low_stock_products: products.low_stock,
            };
            (StatusCode::OK, Json(ApiResponse::success(stats))).into_response()
        }
        _ => {
            let error = users
                .error
                .or(products.error)
                .unwrap_or_else(|| "Failed to retrieve statistics".to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::failure(error)),
            )
                .into_response()
        }
    }
}
