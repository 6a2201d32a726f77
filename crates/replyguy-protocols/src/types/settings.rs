//! Persisted user settings.

use serde::{Deserialize, Serialize};

use super::OpenAIModel;

/// API credentials and model choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: OpenAIModel,
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// User-defined generation persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl CustomProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_has_no_key() {
        let settings = Settings::default();
        assert!(!settings.has_api_key());
        assert_eq!(settings.model, OpenAIModel::Gpt35Turbo);
    }

    #[test]
    fn test_whitespace_key_is_missing() {
        let settings = Settings {
            api_key: "   ".to_string(),
            model: OpenAIModel::Gpt4,
        };
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = CustomProfile {
            id: "p1".to_string(),
            name: "Founder".to_string(),
            description: "terse and upbeat".to_string(),
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        let back: CustomProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_profile_new_stamps_time() {
        let profile = CustomProfile::new("p2", "Analyst", "numbers first");
        assert!(profile.created_at > 0);
    }
}
