//! Application state - Dependency injection container.
//!
//! Provides handlers with the services and the loaded configuration.

use std::sync::Arc;

use crate::config::Config;
use crate::services::{ProductService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    pub config: Config,
}

impl AppState {
    /// Build the in-memory repositories and services described by `config`.
    pub fn from_config(config: Config) -> Self {
        let container = Services::from_config(&config);
        Self::from_container(&container, config)
    }

    /// Take services from any container implementation.
    pub fn from_container(container: &dyn ServiceContainer, config: Config) -> Self {
        Self {
            user_service: container.users(),
            product_service: container.products(),
            config,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        product_service: Arc<dyn ProductService>,
        config: Config,
    ) -> Self {
        Self {
            user_service,
            product_service,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockServiceContainer;

    #[tokio::test]
    async fn test_from_container_uses_container_services() {
        let services = Services::from_config(&Config::default());
        let users = services.users();
        let products = services.products();

        let mut container = MockServiceContainer::new();
        container
            .expect_users()
            .times(1)
            .returning(move || users.clone());
        container
            .expect_products()
            .times(1)
            .returning(move || products.clone());

        let state = AppState::from_container(&container, Config::default());
        assert!(state.user_service.get_user_by_id("2").await.success);
    }

    #[tokio::test]
    async fn test_new_with_injected_services() {
        let config = Config {
            seed_data: false,
            ..Config::default()
        };
        let services = Services::from_config(&config);

        let state = AppState::new(services.users(), services.products(), config);
        assert!(state
            .product_service
            .get_product_by_id("1")
            .await
            .failed_with("Product not found"));
    }
}
