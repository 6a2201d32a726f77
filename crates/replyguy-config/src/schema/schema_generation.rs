//! Completion endpoint and sampling limits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_reply_max_tokens")]
    pub reply_max_tokens: u32,

    #[serde(default = "default_reply_temperature")]
    pub reply_temperature: f32,

    #[serde(default = "default_post_max_tokens")]
    pub post_max_tokens: u32,

    #[serde(default = "default_post_temperature")]
    pub post_temperature: f32,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_reply_max_tokens() -> u32 {
    100
}

fn default_reply_temperature() -> f32 {
    0.8
}

fn default_post_max_tokens() -> u32 {
    150
}

fn default_post_temperature() -> f32 {
    0.9
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            reply_max_tokens: default_reply_max_tokens(),
            reply_temperature: default_reply_temperature(),
            post_max_tokens: default_post_max_tokens(),
            post_temperature: default_post_temperature(),
        }
    }
}
