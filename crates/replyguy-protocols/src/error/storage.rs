//! Settings storage errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error_names_key() {
        let err = StorageError::Serialization {
            key: "replyguy_custom_profiles".to_string(),
            message: "expected array".to_string(),
        };
        assert!(err.to_string().contains("replyguy_custom_profiles"));
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = StorageError::Backend("quota exceeded".to_string());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
