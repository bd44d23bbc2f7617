//! Storefront API - Users and products over in-memory repositories
//!
//! A layered CRUD service: a generic in-memory store provides filter,
//! sort and pagination; entity repositories add domain queries; services
//! validate input and return uniform response envelopes; axum handlers
//! expose them over HTTP.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, DTOs and input rules
//! - **services**: Application use cases and business logic
//! - **infra**: In-memory store and repositories
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start on another port with debug logging
//! cargo run -- -v serve --port 8080
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Product, User, UserRole};
pub use errors::{AppError, AppResult};
pub use types::ApiResponse;
