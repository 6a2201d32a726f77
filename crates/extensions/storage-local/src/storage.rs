//! Settings and custom profiles on top of a [`KeyValueBackend`].

use async_trait::async_trait;
use tracing::{debug, warn};

use replyguy_protocols::{CustomProfile, OpenAIModel, Settings, SettingsStore, StorageError};

use crate::backend::KeyValueBackend;

pub const API_KEY_KEY: &str = "replyguy_api_key";
pub const MODEL_KEY: &str = "replyguy_model";
pub const CUSTOM_PROFILES_KEY: &str = "replyguy_custom_profiles";

/// Typed view over the extension's persisted values.
pub struct SettingsStorage<B> {
    backend: B,
}

impl<B: KeyValueBackend> SettingsStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Missing values fall back to an empty key and the default model.
    pub async fn load_settings(&self) -> Result<Settings, StorageError> {
        let api_key = self.backend.get(API_KEY_KEY).await?.unwrap_or_default();
        let model = match self.backend.get(MODEL_KEY).await? {
            Some(name) => OpenAIModel::parse(&name).unwrap_or_else(|| {
                warn!("Unknown model {:?} in storage, using default", name);
                OpenAIModel::default()
            }),
            None => OpenAIModel::default(),
        };
        debug!(
            "Loaded settings: api key length {}, model {}",
            api_key.len(),
            model
        );
        Ok(Settings { api_key, model })
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<(), StorageError> {
        debug!("Saving api key with length {}", api_key.len());
        self.backend.set(API_KEY_KEY, api_key).await?;
        Ok(())
    }

    pub async fn set_model(&self, model: OpenAIModel) -> Result<(), StorageError> {
        self.backend.set(MODEL_KEY, model.as_str()).await?;
        Ok(())
    }

    pub async fn load_custom_profiles(&self) -> Result<Vec<CustomProfile>, StorageError> {
        match self.backend.get(CUSTOM_PROFILES_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Serialization {
                    key: CUSTOM_PROFILES_KEY.to_string(),
                    message: e.to_string(),
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Replace the profile with the same id in place, or append it.
    pub async fn save_custom_profile(&self, profile: CustomProfile) -> Result<(), StorageError> {
        let mut profiles = self.load_custom_profiles().await?;
        match profiles.iter().position(|p| p.id == profile.id) {
            Some(index) => profiles[index] = profile,
            None => profiles.push(profile),
        }
        self.write_profiles(&profiles).await
    }

    /// Create and store a new profile with a fresh id.
    pub async fn create_custom_profile(
        &self,
        name: &str,
        description: &str,
    ) -> Result<CustomProfile, StorageError> {
        let id = format!("profile_{}", uuid::Uuid::new_v4().simple());
        let profile = CustomProfile::new(id, name.trim(), description.trim());
        self.save_custom_profile(profile.clone()).await?;
        Ok(profile)
    }

    /// Returns whether a profile was removed. The list is rewritten either way.
    pub async fn delete_custom_profile(&self, id: &str) -> Result<bool, StorageError> {
        let mut profiles = self.load_custom_profiles().await?;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        self.write_profiles(&profiles).await?;
        Ok(profiles.len() != before)
    }

    async fn write_profiles(&self, profiles: &[CustomProfile]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(profiles).map_err(|e| StorageError::Serialization {
            key: CUSTOM_PROFILES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.backend.set(CUSTOM_PROFILES_KEY, &raw).await?;
        debug!("Stored {} custom profiles", profiles.len());
        Ok(())
    }
}

#[async_trait(?Send)]
impl<B: KeyValueBackend> SettingsStore for SettingsStorage<B> {
    async fn get_settings(&self) -> Result<Settings, StorageError> {
        self.load_settings().await
    }

    async fn get_custom_profiles(&self) -> Result<Vec<CustomProfile>, StorageError> {
        self.load_custom_profiles().await
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
