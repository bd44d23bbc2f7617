//! Product handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use super::reply;
use crate::api::extractors::{empty_as_none, JsonBody, ValidatedQuery};
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use crate::domain::{CreateProductDto, Product, StockAdjustment, UpdateProductDto};
use crate::types::{PaginationParams, SortOrder};

const NOT_FOUND: &str = "Product not found";

/// Query string accepted by `GET /api/products`.
///
/// Filters are tried in order: `search`, `category`, `minPrice` with
/// `maxPrice`, `available=true`, `lowStock`. Without any of them a page
/// of products is returned. Empty values are treated as absent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub low_stock: Option<i64>,
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u64>,
    #[validate(range(min = 1, message = "limit must be at least 1"))]
    pub limit: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl ProductListQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(
            self.page.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .sorted(
            self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_FIELD),
            self.sort_order.unwrap_or(SortOrder::Desc),
        )
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", patch(update_stock))
}

/// Search, filter or page through products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on name or description"),
        ("category" = Option<String>, Query, description = "Category ID"),
        ("minPrice" = Option<f64>, Query, description = "Lower price bound, used with maxPrice"),
        ("maxPrice" = Option<f64>, Query, description = "Upper price bound, used with minPrice"),
        ("available" = Option<bool>, Query, description = "`true` lists products in stock"),
        ("lowStock" = Option<i64>, Query, description = "List available products at or below this stock"),
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("sortBy" = Option<String>, Query, description = "Sort field, default createdAt"),
        ("sortOrder" = Option<SortOrder>, Query, description = "asc or desc, default desc")
    ),
    responses(
        (status = 200, description = "Products in the response envelope", body = [Product]),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductListQuery>,
) -> Response {
    let products = &state.product_service;

    if let Some(term) = &query.search {
        return reply(products.search_products(term).await, StatusCode::OK, NOT_FOUND)
            .into_response();
    }
    if let Some(category) = &query.category {
        return reply(
            products.get_products_by_category(category).await,
            StatusCode::OK,
            NOT_FOUND,
        )
        .into_response();
    }
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        return reply(
            products.get_products_by_price_range(min, max).await,
            StatusCode::OK,
            NOT_FOUND,
        )
        .into_response();
    }
    if query.available == Some(true) {
        return reply(products.get_available_products().await, StatusCode::OK, NOT_FOUND)
            .into_response();
    }
    if let Some(threshold) = query.low_stock {
        return reply(
            products.get_low_stock_products(threshold).await,
            StatusCode::OK,
            NOT_FOUND,
        )
        .into_response();
    }

    reply(
        products.get_all_products(query.pagination()).await,
        StatusCode::OK,
        NOT_FOUND,
    )
    .into_response()
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateProductDto>,
) -> Response {
    let response = state.product_service.create_product(payload).await;
    reply(response, StatusCode::CREATED, NOT_FOUND).into_response()
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.product_service.get_product_by_id(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

/// Update product fields; availability follows the stock
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateProductDto>,
) -> Response {
    let response = state.product_service.update_product(&id, payload).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let response = state.product_service.delete_product(&id).await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

/// Add or remove stock
#[utoipa::path(
    patch,
    path = "/api/products/{id}/stock",
    tag = "Products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = StockAdjustment,
    responses(
        (status = 200, description = "Stock updated", body = Product),
        (status = 400, description = "Insufficient stock or invalid quantity"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StockAdjustment>,
) -> Response {
    let response = state
        .product_service
        .update_stock(&id, payload.quantity)
        .await;
    reply(response, StatusCode::OK, NOT_FOUND).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::Uri};

    use super::*;

    #[test]
    fn test_explicit_sort_is_kept() {
        let query = ProductListQuery {
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Asc),
            limit: Some(2),
            ..Default::default()
        };
        let params = query.pagination();

        assert_eq!(params.limit, 2);
        assert_eq!(params.sort_by.as_deref(), Some("price"));
        assert_eq!(params.sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn test_empty_filters_fall_through() {
        let uri: Uri = "/api/products?search=&category=&lowStock=&minPrice=&maxPrice="
            .parse()
            .unwrap();
        let Query(query) = Query::<ProductListQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(query.search, None);
        assert_eq!(query.category, None);
        assert_eq!(query.min_price, None);
        assert_eq!(query.max_price, None);
        assert_eq!(query.low_stock, None);
    }

    #[test]
    fn test_low_stock_threshold_is_parsed() {
        let uri: Uri = "/api/products?lowStock=30&minPrice=9.5".parse().unwrap();
        let Query(query) = Query::<ProductListQuery>::try_from_uri(&uri).unwrap();

        assert_eq!(query.low_stock, Some(30));
        assert_eq!(query.min_price, Some(9.5));
    }
}
