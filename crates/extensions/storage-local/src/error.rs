//! Local storage errors.

use std::path::PathBuf;

use replyguy_protocols::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create storage directory at {path}: {reason}")]
    CreateDirFailed { path: PathBuf, reason: String },

    #[error("Corrupt storage file {path}: {reason}")]
    CorruptFile { path: PathBuf, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<LocalStorageError> for StorageError {
    fn from(err: LocalStorageError) -> Self {
        StorageError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = LocalStorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_conversion_to_storage_error() {
        let err = LocalStorageError::Unavailable("quota exceeded".to_string());
        let storage: StorageError = err.into();
        assert_eq!(
            storage.to_string(),
            "Storage backend error: Storage unavailable: quota exceeded"
        );
    }
}
