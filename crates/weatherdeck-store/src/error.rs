//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {key}: {source}")]
    Remove {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CreateDir { .. } => "Unable to open the data directory. Check its permissions.",
            Self::Read { .. } => "Saved data could not be read. Defaults are in use.",
            Self::Write { .. } | Self::Remove { .. } | Self::Serialize { .. } => {
                "Your change could not be saved. Please try again."
            }
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_user_message() {
        let err = StorageError::Write {
            key: "favorites".into(),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("favorites"));
        assert!(err.user_message().contains("could not be saved"));
    }
}
