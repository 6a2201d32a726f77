//! Read access to persisted settings.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{CustomProfile, Settings};

/// Settings source consulted before each generation.
#[async_trait(?Send)]
pub trait SettingsStore {
    async fn get_settings(&self) -> Result<Settings, StorageError>;

    async fn get_custom_profiles(&self) -> Result<Vec<CustomProfile>, StorageError>;

    async fn find_profile(&self, id: &str) -> Result<CustomProfile, StorageError> {
        self.get_custom_profiles()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StorageError::ProfileNotFound(id.to_string()))
    }
}
