//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product domain entity.
///
/// `is_available` always equals `stock > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Laptop Pro")]
    pub name: String,
    #[schema(example = "High-performance laptop for professionals")]
    pub description: String,
    #[schema(example = 1299.99)]
    pub price: f64,
    #[schema(example = "cat1")]
    pub category_id: String,
    #[schema(example = 50)]
    pub stock: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Recompute availability from stock
    pub fn sync_availability(&mut self) {
        self.is_available = self.stock > 0;
    }
}

/// Product fields supplied at creation; id and timestamps are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub stock: i64,
    pub is_available: bool,
}

impl From<CreateProductDto> for NewProduct {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            is_available: dto.stock > 0,
            name: dto.name,
            description: dto.description,
            price: dto.price,
            category_id: dto.category_id,
            stock: dto.stock,
        }
    }
}

/// Product creation data transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[schema(example = "USB-C Hub")]
    pub name: String,
    #[schema(example = "7-in-1 USB-C hub")]
    pub description: String,
    /// Unit price, greater than 0
    #[schema(example = 49.99)]
    pub price: f64,
    #[schema(example = "cat2")]
    pub category_id: String,
    /// Units in stock, non-negative
    #[schema(example = 40)]
    pub stock: i64,
}

/// Product update data transfer object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<String>,
    pub stock: Option<i64>,
    /// Accepted for compatibility; availability is always derived from stock
    pub is_available: Option<bool>,
}

impl UpdateProductDto {
    pub fn stock(stock: i64) -> Self {
        Self {
            stock: Some(stock),
            is_available: Some(stock > 0),
            ..Default::default()
        }
    }
}

/// Stock adjustment request body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StockAdjustment {
    /// Signed change applied to the current stock
    pub quantity: i64,
}

/// Product totals shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCounts {
    pub total: u64,
    pub low_stock: u64,
}
