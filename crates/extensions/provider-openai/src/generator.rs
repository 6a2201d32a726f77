//! OpenAI generator implementation.

use async_trait::async_trait;
use tracing::{debug, warn};

use replyguy_config::GenerationConfig;
use replyguy_protocols::{GenerationError, GenerationMode, GenerationRequest, Generator};

use crate::api::{self, ApiMessage, ApiRequest, ApiResponse};
use crate::prompts;

/// Reply and post generation over the chat completions endpoint.
pub struct OpenAIGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl OpenAIGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Point at an OpenAI-compatible endpoint.
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self::new(GenerationConfig {
            api_url: api_url.into(),
            ..Default::default()
        })
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    pub(crate) fn build_request(&self, request: &GenerationRequest) -> ApiRequest {
        let custom = request.custom_description.as_deref();
        match &request.subject {
            Some(subject) => ApiRequest {
                model: request.model.clone(),
                messages: vec![
                    ApiMessage::system(prompts::reply_system_prompt(&request.option, custom)),
                    ApiMessage::user(prompts::reply_user_message(subject)),
                ],
                max_tokens: Some(self.config.reply_max_tokens),
                temperature: Some(self.config.reply_temperature),
            },
            None => ApiRequest {
                model: request.model.clone(),
                messages: vec![
                    ApiMessage::system(prompts::post_system_prompt(&request.option, custom)),
                    ApiMessage::user(prompts::POST_USER_MESSAGE),
                ],
                max_tokens: Some(self.config.post_max_tokens),
                temperature: Some(self.config.post_temperature),
            },
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<ApiResponse, GenerationError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_api_response(status, api::error_message(&text)));
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_request = self.build_request(request);
        debug!(
            "requesting {:?} completion from {} with {}",
            request.mode(),
            self.config.api_url,
            api_request.model
        );
        let response = self.send_request(&request.api_key, &api_request).await?;
        if let Some(reason) = response.finish_reason().filter(|r| *r != "stop") {
            warn!("completion finished early: {}", reason);
        }
        response.first_text().ok_or_else(|| {
            GenerationError::EmptyCompletion(
                match request.mode() {
                    GenerationMode::Reply => "No reply generated",
                    GenerationMode::Post => "No post generated",
                }
                .to_string(),
            )
        })
    }
}

#[async_trait(?Send)]
impl Generator for OpenAIGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        if request.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        self.complete(&request).await.map_err(|e| {
            warn!("completion failed: {:?}", e);
            let what = match request.mode() {
                GenerationMode::Reply => "reply",
                GenerationMode::Post => "post",
            };
            GenerationError::Failed(format!("Failed to generate {}: {}", what, e))
        })
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
