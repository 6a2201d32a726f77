//! Session errors.
//!
//! DOM failures never leave the core; they degrade to placeholders, `None`
//! or a teardown. Only the generation session reports errors, and its
//! messages are shown to the user as they are.

use replyguy_protocols::{GenerationError, StorageError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("A generation is already in progress")]
    Busy,

    #[error("Please add your OpenAI API key in the extension settings")]
    MissingApiKey,

    #[error("Please enter custom instructions")]
    EmptyCustomInstruction,

    #[error("Failed to load settings: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Generation(#[from] GenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            SessionError::MissingApiKey.to_string(),
            "Please add your OpenAI API key in the extension settings"
        );
        assert_eq!(
            SessionError::EmptyCustomInstruction.to_string(),
            "Please enter custom instructions"
        );
    }

    #[test]
    fn test_generation_error_passes_through() {
        let err = SessionError::from(GenerationError::Failed(
            "Failed to generate reply: timeout".to_string(),
        ));
        assert_eq!(err.to_string(), "Failed to generate reply: timeout");
    }

    #[test]
    fn test_storage_error_wrapped() {
        let err = SessionError::from(StorageError::Backend("quota".to_string()));
        assert!(err.to_string().starts_with("Failed to load settings"));
        assert!(err.to_string().contains("quota"));
    }
}
