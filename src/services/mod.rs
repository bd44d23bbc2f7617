//! Application services layer - Use cases and business logic.
//!
//! Services validate input, apply business rules and wrap every outcome
//! in an `ApiResponse` envelope. They depend on repository traits for
//! dependency inversion.

pub mod container;
mod product_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use product_service::{ProductManager, ProductService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
