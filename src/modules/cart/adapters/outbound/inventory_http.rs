use crate::modules::cart::adapters::outbound::inventory::{
    InventoryError, ProductCatalog, StockService,
};
use crate::modules::cart::core::product::Product;
use crate::modules::cart::core::stock::StockSnapshot;
use crate::shared::core::primitives::ProductId;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

#[derive(Deserialize)]
struct StockResponse {
    #[serde(default)]
    id: Option<ProductId>,
    amount: i64,
}

/// Inventory API client serving `stock/{id}` and `products/{id}` below a base url.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    client: Client,
    base_url: Url,
}

impl HttpInventory {
    /// Without a timeout a stalled request keeps the operation pending.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, InventoryError> {
        if base_url.cannot_be_a_base() {
            return Err(InventoryError::InvalidBaseUrl(base_url.to_string()));
        }
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        product_id: ProductId,
    ) -> Result<T, InventoryError> {
        let url = self
            .base_url
            .join(&format!("{path}/{product_id}"))
            .map_err(|err| InventoryError::InvalidBaseUrl(err.to_string()))?;

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(InventoryError::NotFound {
                resource,
                product_id,
            });
        }
        let body = response.error_for_status()?.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| InventoryError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl StockService for HttpInventory {
    #[instrument(skip(self))]
    async fn stock(&self, product_id: ProductId) -> Result<StockSnapshot, InventoryError> {
        let response: StockResponse = self.get_json("stock", "stock", product_id).await?;
        match response.id {
            Some(id) if id != product_id => Err(InventoryError::Malformed(format!(
                "stock for product {id} returned for product {product_id}"
            ))),
            _ => Ok(StockSnapshot::new(product_id, response.amount)),
        }
    }
}

#[async_trait]
impl ProductCatalog for HttpInventory {
    #[instrument(skip(self))]
    async fn product(&self, product_id: ProductId) -> Result<Product, InventoryError> {
        self.get_json("product", "products", product_id).await
    }
}
