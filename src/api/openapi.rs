//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{product_handler, stats_handler, user_handler};
use crate::domain::{
    CreateProductDto, CreateUserDto, Product, StockAdjustment, UpdateProductDto, UpdateUserDto,
    User, UserRole,
};
use crate::types::{PaginationMeta, SortOrder};

/// OpenAPI documentation for the Storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.1.0",
        description = "Users and products over in-memory repositories",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::delete_user,
        user_handler::deactivate_user,
        user_handler::activate_user,
        // Product endpoints
        product_handler::list_products,
        product_handler::create_product,
        product_handler::get_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::update_stock,
        // Dashboard
        stats_handler::dashboard_stats,
    ),
    components(
        schemas(
            UserRole,
            User,
            CreateUserDto,
            UpdateUserDto,
            Product,
            CreateProductDto,
            UpdateProductDto,
            StockAdjustment,
            SortOrder,
            PaginationMeta,
            stats_handler::DashboardStats,
        )
    ),
    tags(
        (name = "Users", description = "User management operations"),
        (name = "Products", description = "Catalogue and stock operations"),
        (name = "Dashboard", description = "Aggregate counts")
    )
)]
pub struct ApiDoc;
