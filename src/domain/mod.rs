//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod product;
pub mod user;
pub mod validation;

pub use product::{
    CreateProductDto, NewProduct, Product, ProductCounts, StockAdjustment, UpdateProductDto,
};
pub use user::{CreateUserDto, NewUser, UpdateUserDto, User, UserCounts, UserRole};
