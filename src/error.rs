//! Error types for identity provider management operations.
//!
//! Delegate registry failures live in [`crate::registry::RegistryError`];
//! this module holds the crate-level error that configuration checks, file
//! loading and parsing produce. Only configuration errors reach the caller:
//! the sync and reconcile steps log the others and move on.

use std::path::PathBuf;

/// Main error type for identity provider management.
#[derive(Debug, thiserror::Error)]
pub enum IdpMgtError {
    /// Reading a configuration file failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not match the record model
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not describe a usable provider
    #[error("Invalid identity provider record: {message}")]
    InvalidRecord { message: String },

    /// The component configuration cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl IdpMgtError {
    /// Build an I/O error tagged with the file it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an invalid record error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Build an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for identity provider management operations.
pub type IdpMgtResult<T> = Result<T, IdpMgtError>;
