// Outbound ports towards the remote inventory.
//
// The cart reads stock and catalog data through these traits only. Adapters
// live next to this file: an HTTP client and an in memory double.

use crate::modules::cart::core::product::Product;
use crate::modules::cart::core::stock::StockSnapshot;
use crate::shared::core::primitives::ProductId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{resource} for product {product_id} not found")]
    NotFound {
        resource: &'static str,
        product_id: ProductId,
    },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("inventory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<StockSnapshot, InventoryError>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError>;
}
