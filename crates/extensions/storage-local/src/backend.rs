//! Key-value backends.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
#[cfg(not(target_arch = "wasm32"))]
use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use tracing::{debug, info};

use crate::error::LocalStorageError;

/// String-valued store addressed by key, the shape of `localStorage`.
#[async_trait(?Send)]
pub trait KeyValueBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStorageError>;

    async fn remove(&self, key: &str) -> Result<(), LocalStorageError>;
}

/// In-process backend.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
    failure: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    fn check(&self) -> Result<(), LocalStorageError> {
        match self.failure.lock().as_ref() {
            Some(message) => Err(LocalStorageError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        self.check()?;
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        self.check()?;
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStorageError> {
        self.check()?;
        self.values.lock().remove(key);
        Ok(())
    }
}

/// Backend persisted as one JSON object on disk.
///
/// The whole file is read once at open and rewritten on every change.
#[cfg(not(target_arch = "wasm32"))]
pub struct JsonFileBackend {
    path: PathBuf,
    cache: Mutex<BTreeMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileBackend {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LocalStorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    LocalStorageError::CreateDirFailed {
                        path: parent.to_path_buf(),
                        reason: e.to_string(),
                    }
                })?;
                info!("Created storage directory: {:?}", parent);
            }
        }

        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| LocalStorageError::CorruptFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };
        debug!("Opened {:?} with {} keys", path, cache.len());

        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Open `replyguy/storage.json` under the platform config directory.
    pub async fn default_path() -> Result<Self, LocalStorageError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| LocalStorageError::Unavailable("no config directory".to_string()))?;
        Self::open(dir.join("replyguy").join("storage.json")).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self) -> Result<(), LocalStorageError> {
        let snapshot = self.cache.lock().clone();
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| LocalStorageError::Unavailable(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Saved storage to {:?}", self.path);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl KeyValueBackend for JsonFileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        Ok(self.cache.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        self.cache.lock().insert(key.to_string(), value.to_string());
        self.flush().await
    }

    async fn remove(&self, key: &str) -> Result<(), LocalStorageError> {
        let removed = self.cache.lock().remove(key).is_some();
        if removed {
            self.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_round() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("a").await.unwrap(), None);
        backend.set("a", "1").await.unwrap();
        assert_eq!(backend.get("a").await.unwrap().as_deref(), Some("1"));
        backend.remove("a").await.unwrap();
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_memory_backend_failure() {
        let backend = MemoryBackend::new();
        backend.fail_with("quota exceeded");
        let err = backend.set("a", "1").await.unwrap_err();
        assert!(matches!(err, LocalStorageError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_json_file_persists_across_opens() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let backend = JsonFileBackend::open(&path).await.unwrap();
        backend.set("replyguy_model", "gpt-4").await.unwrap();
        backend.set("scratch", "x").await.unwrap();
        backend.remove("scratch").await.unwrap();
        assert!(path.exists());

        let reopened = JsonFileBackend::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("replyguy_model").await.unwrap().as_deref(),
            Some("gpt-4")
        );
        assert_eq!(reopened.get("scratch").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_empty_file_is_empty_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "").unwrap();

        let backend = JsonFileBackend::open(&path).await.unwrap();
        assert_eq!(backend.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_corrupt() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = JsonFileBackend::open(&path).await;
        assert!(matches!(result, Err(LocalStorageError::CorruptFile { .. })));
    }
}
