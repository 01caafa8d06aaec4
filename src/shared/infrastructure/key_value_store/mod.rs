// String keyed store that outlives the process.
//
// Values are opaque strings; encoding them is up to the caller.

pub mod in_memory;
pub mod json_file;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistedStoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait PersistedStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistedStoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistedStoreError>;
}
