use crate::shared::infrastructure::key_value_store::{PersistedStore, PersistedStoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
    offline: AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.get_mut().insert(key.into(), value.into());
        self
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), PersistedStoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(PersistedStoreError::Unavailable("Store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PersistedStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistedStoreError> {
        self.ensure_online()?;
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistedStoreError> {
        self.ensure_online()?;
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
