use crate::shared::infrastructure::key_value_store::{PersistedStore, PersistedStoreError};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

/// Keeps every key in a single JSON object on disk.
///
/// Writes go to a sibling temp file first and are renamed over the target, so
/// a crash mid-write leaves the previous content in place. A file that is not
/// a JSON object is copied to `<path>.corrupt` and replaced on the next write.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, PersistedStoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn corrupt_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }
}

#[async_trait::async_trait]
impl PersistedStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistedStoreError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistedStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.read_all().await {
            Ok(entries) => entries,
            Err(PersistedStoreError::Serialization(err)) => {
                let backup = self.corrupt_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %err,
                    "store file is not valid JSON, replacing it"
                );
                fs::copy(&self.path, &backup).await?;
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(&entries)?).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}
