//! Text generation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("OpenAI API key is required. Please add it in the extension settings.")]
    MissingApiKey,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    EmptyCompletion(String),

    /// A failure already wrapped with a user-facing prefix.
    #[error("{0}")]
    Failed(String),
}

impl GenerationError {
    /// Classify a non-success HTTP response from a completion endpoint.
    pub fn from_api_response(status: u16, message: String) -> Self {
        let lower = message.to_lowercase();
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            429 => Self::RateLimited {
                retry_after_seconds: 20,
            },
            400 if lower.contains("content filter") || lower.contains("content_filter") => {
                Self::ContentFiltered(message)
            }
            400 => Self::InvalidRequest(message),
            _ => Self::ApiError { status, message },
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Network(_) | Self::EmptyCompletion(_)
        )
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod tests;
