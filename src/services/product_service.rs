//! Product service - Catalogue and inventory use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::PRODUCT_ENTITY;
use crate::domain::{validation, CreateProductDto, Product, ProductCounts, UpdateProductDto};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{ProductRepository, QueryOptions};
use crate::types::{ApiResponse, PaginatedResponse, PaginationParams};

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Validate price, stock and name, in that order, then create
    async fn create_product(&self, dto: CreateProductDto) -> ApiResponse<Product>;

    async fn get_product_by_id(&self, id: &str) -> ApiResponse<Product>;

    async fn get_all_products(
        &self,
        params: PaginationParams,
    ) -> ApiResponse<PaginatedResponse<Product>>;

    async fn get_available_products(&self) -> ApiResponse<Vec<Product>>;

    async fn update_product(&self, id: &str, dto: UpdateProductDto) -> ApiResponse<Product>;

    async fn delete_product(&self, id: &str) -> ApiResponse<bool>;

    async fn search_products(&self, term: &str) -> ApiResponse<Vec<Product>>;

    async fn get_products_by_category(&self, category_id: &str) -> ApiResponse<Vec<Product>>;

    async fn get_products_by_price_range(&self, min: f64, max: f64)
        -> ApiResponse<Vec<Product>>;

    /// Apply a signed stock change
    async fn update_stock(&self, id: &str, quantity: i64) -> ApiResponse<Product>;

    async fn get_low_stock_products(&self, threshold: i64) -> ApiResponse<Vec<Product>>;

    /// Total and low-stock product counts for `threshold`
    async fn get_inventory_counts(&self, threshold: i64) -> ApiResponse<ProductCounts>;
}

/// Concrete implementation of ProductService over a repository.
pub struct ProductManager<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn try_create(&self, dto: CreateProductDto) -> AppResult<Product> {
        validation::price(dto.price)?;
        validation::stock(dto.stock)?;
        validation::product_name(&dto.name)?;

        self.repo.create_product(dto).await
    }

    async fn try_get(&self, id: &str) -> AppResult<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(PRODUCT_ENTITY)
    }

    async fn try_update(&self, id: &str, dto: UpdateProductDto) -> AppResult<Product> {
        if let Some(price) = dto.price {
            validation::price(price)?;
        }
        if let Some(stock) = dto.stock {
            validation::stock(stock)?;
        }
        if let Some(name) = &dto.name {
            validation::product_name(name)?;
        }

        self.repo
            .update_product(id, dto)
            .await?
            .ok_or_not_found(PRODUCT_ENTITY)
    }

    async fn try_delete(&self, id: &str) -> AppResult<bool> {
        if !self.repo.exists(id).await? {
            return Err(AppError::NotFound(PRODUCT_ENTITY));
        }
        self.repo.delete(id).await
    }

    async fn try_search(&self, term: &str) -> AppResult<Vec<Product>> {
        let term = validation::search_term(term)?;
        self.repo.search_products(term).await
    }

    async fn try_price_range(&self, min: f64, max: f64) -> AppResult<Vec<Product>> {
        validation::price_range(min, max)?;
        self.repo.find_by_price_range(min, max).await
    }

    async fn try_update_stock(&self, id: &str, quantity: i64) -> AppResult<Product> {
        let product = self
            .repo
            .update_stock(id, quantity)
            .await?
            .ok_or_not_found(PRODUCT_ENTITY)?;

        tracing::info!(product_id = %id, quantity, stock = product.stock, "Stock adjusted");
        Ok(product)
    }

    async fn try_low_stock(&self, threshold: i64) -> AppResult<Vec<Product>> {
        validation::threshold(threshold)?;
        self.repo.get_low_stock_products(threshold).await
    }

    async fn try_counts(&self, threshold: i64) -> AppResult<ProductCounts> {
        let total = self.repo.count(QueryOptions::new()).await?;
        let low_stock = self.try_low_stock(threshold).await?.len() as u64;

        Ok(ProductCounts { total, low_stock })
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> ProductService for ProductManager<R> {
    async fn create_product(&self, dto: CreateProductDto) -> ApiResponse<Product> {
        ApiResponse::from_result(self.try_create(dto).await, "Failed to create product")
            .on_success("Product created successfully")
    }

    async fn get_product_by_id(&self, id: &str) -> ApiResponse<Product> {
        ApiResponse::from_result(self.try_get(id).await, "Failed to retrieve product")
    }

    async fn get_all_products(
        &self,
        params: PaginationParams,
    ) -> ApiResponse<PaginatedResponse<Product>> {
        let options = QueryOptions::new().sorted_by(&params);
        let result = self.repo.find_with_pagination(params, options).await;

        ApiResponse::from_result(result, "Failed to retrieve products")
    }

    async fn get_available_products(&self) -> ApiResponse<Vec<Product>> {
        ApiResponse::from_result(
            self.repo.find_available_products().await,
            "Failed to retrieve available products",
        )
    }

    async fn update_product(&self, id: &str, dto: UpdateProductDto) -> ApiResponse<Product> {
        ApiResponse::from_result(self.try_update(id, dto).await, "Failed to update product")
            .on_success("Product updated successfully")
    }

    async fn delete_product(&self, id: &str) -> ApiResponse<bool> {
        ApiResponse::from_result(self.try_delete(id).await, "Failed to delete product")
            .on_success("Product deleted successfully")
    }

    async fn search_products(&self, term: &str) -> ApiResponse<Vec<Product>> {
        ApiResponse::from_result(self.try_search(term).await, "Failed to search products")
    }

    async fn get_products_by_category(&self, category_id: &str) -> ApiResponse<Vec<Product>> {
        ApiResponse::from_result(
            self.repo.find_by_category(category_id).await,
            "Failed to retrieve products by category",
        )
    }

    async fn get_products_by_price_range(
        &self,
        min: f64,
        max: f64,
    ) -> ApiResponse<Vec<Product>> {
        ApiResponse::from_result(
            self.try_price_range(min, max).await,
            "Failed to retrieve products by price range",
        )
    }

    async fn update_stock(&self, id: &str, quantity: i64) -> ApiResponse<Product> {
        ApiResponse::from_result(self.try_update_stock(id, quantity).await, "Failed to update stock")
            .on_success("Stock updated successfully")
    }

    async fn get_low_stock_products(&self, threshold: i64) -> ApiResponse<Vec<Product>> {
        ApiResponse::from_result(
            self.try_low_stock(threshold).await,
            "Failed to retrieve low stock products",
        )
    }

    async fn get_inventory_counts(&self, threshold: i64) -> ApiResponse<ProductCounts> {
        ApiResponse::from_result(
            self.try_counts(threshold).await,
            "Failed to retrieve product statistics",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockProductRepository;
    use chrono::Utc;

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: "Desk Lamp".to_string(),
            description: "LED lamp".to_string(),
            price: 19.5,
            category_id: "cat3".to_string(),
            stock,
            is_available: stock > 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_dto(name: &str, price: f64, stock: i64) -> CreateProductDto {
        CreateProductDto {
            name: name.to_string(),
            description: "Something".to_string(),
            price,
            category_id: "cat1".to_string(),
            stock,
        }
    }

    #[tokio::test]
    async fn test_create_validation_order() {
        let mut mock = MockProductRepository::new();
        mock.expect_create_product().never();
        let service = ProductManager::new(Arc::new(mock));

        let response = service.create_product(create_dto("x", 0.0, -1)).await;
        assert!(response.failed_with("Price must be greater than 0"));

        let response = service.create_product(create_dto("x", 5.0, -1)).await;
        assert!(response.failed_with("Stock must be a non-negative number"));

        let response = service.create_product(create_dto("x", 5.0, 1)).await;
        assert!(response.failed_with("Product name must be at least 2 characters long"));
    }

    #[tokio::test]
    async fn test_insufficient_stock_surfaces_its_message() {
        let mut mock = MockProductRepository::new();
        mock.expect_update_stock()
            .returning(|_, _| Err(AppError::InsufficientStock));

        let service = ProductManager::new(Arc::new(mock));
        let response = service.update_stock("1", -60).await;

        assert!(response.failed_with("Insufficient stock"));
    }

    #[tokio::test]
    async fn test_update_stock_absent_product() {
        let mut mock = MockProductRepository::new();
        mock.expect_update_stock().returning(|_, _| Ok(None));

        let service = ProductManager::new(Arc::new(mock));
        assert!(service
            .update_stock("99", 1)
            .await
            .failed_with("Product not found"));
    }

    #[tokio::test]
    async fn test_update_stock_success_message() {
        let mut mock = MockProductRepository::new();
        mock.expect_update_stock()
            .returning(|id, delta| Ok(Some(product(id, 10 + delta))));

        let service = ProductManager::new(Arc::new(mock));
        let response = service.update_stock("1", 5).await;

        assert_eq!(response.data.map(|p| p.stock), Some(15));
        assert_eq!(response.message.as_deref(), Some("Stock updated successfully"));
    }

    #[tokio::test]
    async fn test_invalid_price_range() {
        let mut mock = MockProductRepository::new();
        mock.expect_find_by_price_range().never();

        let service = ProductManager::new(Arc::new(mock));
        let response = service.get_products_by_price_range(100.0, 10.0).await;

        assert!(response.failed_with("Invalid price range"));
    }

    #[tokio::test]
    async fn test_negative_threshold() {
        let mut mock = MockProductRepository::new();
        mock.expect_get_low_stock_products().never();

        let service = ProductManager::new(Arc::new(mock));
        let response = service.get_low_stock_products(-1).await;

        assert!(response.failed_with("Threshold must be a non-negative number"));
    }

    #[tokio::test]
    async fn test_delete_absent_product() {
        let mut mock = MockProductRepository::new();
        mock.expect_exists().returning(|_| Ok(false));
        mock.expect_delete().never();

        let service = ProductManager::new(Arc::new(mock));
        assert!(service
            .delete_product("99")
            .await
            .failed_with("Product not found"));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_stock() {
        let mut mock = MockProductRepository::new();
        mock.expect_update_product().never();

        let service = ProductManager::new(Arc::new(mock));
        let response = service
            .update_product("1", UpdateProductDto::stock(-3))
            .await;

        assert!(response.failed_with("Stock must be a non-negative number"));
    }

    #[tokio::test]
    async fn test_inventory_counts() {
        let mut mock = MockProductRepository::new();
        mock.expect_count().returning(|_| Ok(3));
        mock.expect_get_low_stock_products()
            .returning(|_| Ok(vec![product("3", 4)]));

        let service = ProductManager::new(Arc::new(mock));
        let response = service.get_inventory_counts(10).await;

        assert_eq!(
            response.data,
            Some(ProductCounts {
                total: 3,
                low_stock: 1
            })
        );
    }
}
