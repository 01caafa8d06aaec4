use crate::modules::cart::core::cart::Cart;
use crate::shared::infrastructure::key_value_store::{PersistedStore, PersistedStoreError};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Stores the whole cart as JSON under one key of the persisted store.
pub struct CartRepository<TStore>
where
    TStore: PersistedStore + 'static,
{
    store: Arc<TStore>,
    key: String,
}

impl<TStore> CartRepository<TStore>
where
    TStore: PersistedStore + 'static,
{
    pub fn new(store: Arc<TStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored cart. A missing, unreadable or unparsable value yields
    /// an empty cart.
    pub async fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "could not read stored cart, starting empty");
                return Cart::new();
            }
        };
        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, entries = cart.len(), "restored cart");
                cart
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored cart is not valid, starting empty");
                Cart::new()
            }
        }
    }

    pub async fn save(&self, cart: &Cart) -> Result<(), PersistedStoreError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw).await
    }

    /// Saves without retrying. A failed write only leaves a log line behind.
    pub async fn persist(&self, cart: &Cart) {
        if let Err(err) = self.save(cart).await {
            warn!(key = %self.key, error = %err, "failed to persist cart");
        }
    }
}
