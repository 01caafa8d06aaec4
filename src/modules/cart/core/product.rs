use crate::shared::core::primitives::ProductId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display data for a product as served by the catalog.
///
/// Fields the cart does not know about are kept in `extra` so they survive a
/// round trip through the persisted store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "imageUrl")]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            extra: Map::new(),
        }
    }
}
