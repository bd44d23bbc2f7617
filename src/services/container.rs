//! Service Container - Centralized service access.
//!
//! Built once at startup from `Config` and shared through the HTTP state.

use std::sync::Arc;

use super::{ProductManager, ProductService, UserManager, UserService};
use crate::config::Config;
use crate::infra::{ProductStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    product_service: Arc<dyn ProductService>,
}

impl Services {
    /// Build in-memory repositories and the services over them.
    ///
    /// Repositories start with the sample records unless `seed_data` is off.
    pub fn from_config(config: &Config) -> Self {
        let (users, products) = if config.seed_data {
            (UserStore::seeded(), ProductStore::seeded())
        } else {
            (UserStore::new(), ProductStore::new())
        };

        tracing::info!(seeded = config.seed_data, "Initialized in-memory repositories");

        Self {
            user_service: Arc::new(UserManager::new(Arc::new(users))),
            product_service: Arc::new(ProductManager::new(Arc::new(products))),
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }
}
