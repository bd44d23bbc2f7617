//! Product repository over the in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::base::{Entity, InMemoryStore};
use super::query::{FieldValue, QueryOptions};
use super::seed;
use crate::config::PRODUCTS_TABLE;
use crate::domain::{CreateProductDto, NewProduct, Product, UpdateProductDto};
use crate::errors::{AppError, AppResult};
use crate::types::{PaginatedResponse, PaginationParams};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

impl Entity for Product {
    type Draft = NewProduct;
    type Changes = UpdateProductDto;

    fn from_draft(id: String, now: DateTime<Utc>, draft: NewProduct) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category_id: draft.category_id,
            stock: draft.stock,
            is_available: draft.is_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Availability is never taken from the caller; it follows stock.
    fn apply(&mut self, changes: UpdateProductDto) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        self.sync_availability();
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.clone().into()),
            "name" => Some(self.name.clone().into()),
            "description" => Some(self.description.clone().into()),
            "price" => Some(self.price.into()),
            "categoryId" => Some(self.category_id.clone().into()),
            "stock" => Some(self.stock.into()),
            "isAvailable" => Some(self.is_available.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>>;

    async fn find_all(&self, options: QueryOptions) -> AppResult<Vec<Product>>;

    async fn find_with_pagination(
        &self,
        params: PaginationParams,
        options: QueryOptions,
    ) -> AppResult<PaginatedResponse<Product>>;

    async fn count(&self, options: QueryOptions) -> AppResult<u64>;

    async fn exists(&self, id: &str) -> AppResult<bool>;

    async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Product>>;

    /// Products marked available that also have stock left
    async fn find_available_products(&self) -> AppResult<Vec<Product>>;

    /// Inclusive on both ends
    async fn find_by_price_range(&self, min: f64, max: f64) -> AppResult<Vec<Product>>;

    /// Case-insensitive substring match on name or description
    async fn search_products(&self, term: &str) -> AppResult<Vec<Product>>;

    /// Available products with `stock <= threshold`
    async fn get_low_stock_products(&self, threshold: i64) -> AppResult<Vec<Product>>;

    async fn create_product(&self, dto: CreateProductDto) -> AppResult<Product>;

    async fn update_product(&self, id: &str, dto: UpdateProductDto)
        -> AppResult<Option<Product>>;

    /// Add `delta` to the stock. Fails with `InsufficientStock` when the
    /// result would be negative, leaving the record untouched.
    async fn update_stock(&self, id: &str, delta: i64) -> AppResult<Option<Product>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// In-memory implementation of ProductRepository
#[derive(Debug)]
pub struct ProductStore {
    store: InMemoryStore<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(PRODUCTS_TABLE),
        }
    }

    /// Repository holding the three sample products
    pub fn seeded() -> Self {
        Self {
            store: InMemoryStore::with_records(PRODUCTS_TABLE, seed::products()),
        }
    }
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        self.store.find_by_id(id)
    }

    async fn find_all(&self, options: QueryOptions) -> AppResult<Vec<Product>> {
        self.store.find_all(&options)
    }

    async fn find_with_pagination(
        &self,
        params: PaginationParams,
        options: QueryOptions,
    ) -> AppResult<PaginatedResponse<Product>> {
        self.store.find_with_pagination(&params, &options)
    }

    async fn count(&self, options: QueryOptions) -> AppResult<u64> {
        Ok(self.store.count(&options)? as u64)
    }

    async fn exists(&self, id: &str) -> AppResult<bool> {
        self.store.exists(id)
    }

    async fn find_by_category(&self, category_id: &str) -> AppResult<Vec<Product>> {
        self.store
            .find_all(&QueryOptions::new().filter("categoryId", category_id))
    }

    async fn find_available_products(&self) -> AppResult<Vec<Product>> {
        self.store.find_matching(|p| p.is_available && p.stock > 0)
    }

    async fn find_by_price_range(&self, min: f64, max: f64) -> AppResult<Vec<Product>> {
        let found = self
            .store
            .find_matching(|p| p.price >= min && p.price <= max)?;

        tracing::debug!(min, max, count = found.len(), "Products in price range");
        Ok(found)
    }

    async fn search_products(&self, term: &str) -> AppResult<Vec<Product>> {
        let needle = term.to_lowercase();
        self.store.find_matching(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
    }

    async fn get_low_stock_products(&self, threshold: i64) -> AppResult<Vec<Product>> {
        let found = self
            .store
            .find_matching(|p| p.stock <= threshold && p.is_available)?;

        tracing::debug!(threshold, count = found.len(), "Low stock products");
        Ok(found)
    }

    async fn create_product(&self, dto: CreateProductDto) -> AppResult<Product> {
        self.store.create(NewProduct::from(dto))
    }

    async fn update_product(
        &self,
        id: &str,
        dto: UpdateProductDto,
    ) -> AppResult<Option<Product>> {
        self.store.update(id, dto)
    }

    async fn update_stock(&self, id: &str, delta: i64) -> AppResult<Option<Product>> {
        self.store.update_with(id, |_, current| {
            let new_stock = current.stock.saturating_add(delta);
            if new_stock < 0 {
                tracing::warn!(id, stock = current.stock, delta, "Rejected stock adjustment");
                return Err(AppError::InsufficientStock);
            }
            Ok(UpdateProductDto::stock(new_stock))
        })
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        self.store.delete(id)
    }
}
