//! Text generation seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::types::ExtractedContext;

/// Whether the request drafts a reply or a fresh post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Reply,
    Post,
}

/// Everything a generator needs to produce one draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text being replied to. `None` for top-level posts.
    pub subject: Option<ExtractedContext>,
    /// Tone, category or profile identifier.
    pub option: String,
    /// Free-form persona or instructions.
    pub custom_description: Option<String>,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl GenerationRequest {
    pub fn reply(subject: ExtractedContext, option: impl Into<String>) -> Self {
        Self {
            subject: Some(subject),
            option: option.into(),
            custom_description: None,
            model: String::new(),
            api_key: String::new(),
        }
    }

    pub fn post(option: impl Into<String>) -> Self {
        Self {
            subject: None,
            option: option.into(),
            custom_description: None,
            model: String::new(),
            api_key: String::new(),
        }
    }

    pub fn with_custom_description(mut self, description: impl Into<String>) -> Self {
        self.custom_description = Some(description.into());
        self
    }

    pub fn with_credentials(mut self, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.model = model.into();
        self.api_key = api_key.into();
        self
    }

    pub fn mode(&self) -> GenerationMode {
        if self.subject.is_some() {
            GenerationMode::Reply
        } else {
            GenerationMode::Post
        }
    }
}

/// Produces draft text.
#[async_trait(?Send)]
pub trait Generator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}
