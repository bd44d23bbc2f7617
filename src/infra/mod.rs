//! Infrastructure layer - Storage behind the services
//!
//! Holds the in-memory store and the entity repositories built on it.

pub mod repositories;

pub use repositories::{
    Entity, FieldValue, InMemoryStore, ProductRepository, ProductStore, QueryOptions,
    UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockProductRepository, MockUserRepository};
