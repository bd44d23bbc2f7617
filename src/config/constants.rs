//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// Field list endpoints sort by when the caller gives none
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

// =============================================================================
// Entities
// =============================================================================

/// Table name of the user collection
pub const USERS_TABLE: &str = "users";

/// Table name of the product collection
pub const PRODUCTS_TABLE: &str = "products";

/// Entity label used in "not found" messages
pub const USER_ENTITY: &str = "User";

/// Entity label used in "not found" messages
pub const PRODUCT_ENTITY: &str = "Product";

// =============================================================================
// User Roles
// =============================================================================

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
pub const ROLE_MODERATOR: &str = "moderator";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Inventory
// =============================================================================

/// Stock level at or below which an available product counts as low stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

// =============================================================================
// Validation
// =============================================================================

/// Minimum trimmed length of user and product names
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum trimmed length of a search term
pub const MIN_SEARCH_TERM_LENGTH: usize = 2;
