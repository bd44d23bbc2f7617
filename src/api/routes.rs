//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{dashboard_stats, product_routes, user_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Resource routes
        .nest("/api/users", user_routes())
        .nest("/api/products", product_routes())
        .route("/api/stats", get(dashboard_stats))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to Storefront API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    stores: StoreHealth,
}

/// Record counts per in-memory store
#[derive(Serialize)]
struct StoreHealth {
    users: StoreStatus,
    products: StoreStatus,
}

#[derive(Serialize)]
struct StoreStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StoreStatus {
    fn from_count(count: Option<u64>, error: Option<String>) -> Self {
        match count {
            Some(records) => Self {
                status: "healthy",
                records: Some(records),
                error: None,
            },
            None => Self {
                status: "unhealthy",
                records: None,
                error,
            },
        }
    }
}

/// Health check endpoint reporting the size of each store
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let users = state.user_service.get_user_counts().await;
    let products = state
        .product_service
        .get_inventory_counts(state.config.low_stock_threshold)
        .await;

    let users = StoreStatus::from_count(users.data.map(|c| c.total), users.error);
    let products = StoreStatus::from_count(products.data.map(|c| c.total), products.error);

    let all_healthy = users.status == "healthy" && products.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        stores: StoreHealth { users, products },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
