// In memory implementation of the StockService and ProductCatalog ports.
//
// Purpose
// - Support handler tests and local demos without a running inventory API.
//
// Responsibilities
// - Keep stock levels and catalog entries per product.
// - Simulate an unreachable backend and slow responses on demand.

use crate::modules::cart::adapters::outbound::inventory::{
    InventoryError, ProductCatalog, StockService,
};
use crate::modules::cart::core::product::Product;
use crate::modules::cart::core::stock::StockSnapshot;
use crate::shared::core::primitives::ProductId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryInventory {
    stock: RwLock<HashMap<ProductId, i64>>,
    products: RwLock<HashMap<ProductId, Product>>,
    offline: AtomicBool,
    delay_ms: AtomicU64,
    stock_requests: AtomicUsize,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: Product, stock: i64) -> Self {
        self.stock.get_mut().insert(product.id, stock);
        self.products.get_mut().insert(product.id, product);
        self
    }

    /// Stock without a catalog entry, for products the catalog cannot resolve.
    pub fn with_stock(mut self, product_id: ProductId, stock: i64) -> Self {
        self.stock.get_mut().insert(product_id, stock);
        self
    }

    pub async fn set_stock(&self, product_id: ProductId, stock: i64) {
        self.stock.write().await.insert(product_id, stock);
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn stock_requests(&self) -> usize {
        self.stock_requests.load(Ordering::SeqCst)
    }

    async fn simulate_backend(&self) -> Result<(), InventoryError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(InventoryError::Unavailable("Inventory offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockService for InMemoryInventory {
    async fn stock(&self, product_id: ProductId) -> Result<StockSnapshot, InventoryError> {
        self.stock_requests.fetch_add(1, Ordering::SeqCst);
        self.simulate_backend().await?;
        self.stock
            .read()
            .await
            .get(&product_id)
            .map(|amount| StockSnapshot::new(product_id, *amount))
            .ok_or(InventoryError::NotFound {
                resource: "stock",
                product_id,
            })
    }
}

#[async_trait::async_trait]
impl ProductCatalog for InMemoryInventory {
    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.simulate_backend().await?;
        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(InventoryError::NotFound {
                resource: "product",
                product_id,
            })
    }
}
