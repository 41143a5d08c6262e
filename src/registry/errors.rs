//! Delegate registry error types.

use thiserror::Error;

/// Errors that can occur during delegate registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Identity provider '{name}' not found in tenant '{tenant_domain}'")]
    NotFound {
        /// Name of the provider that was not found
        name: String,
        /// Tenant domain that was searched
        tenant_domain: String,
    },

    #[error("Identity provider '{name}' already exists in tenant '{tenant_domain}'")]
    AlreadyExists {
        /// Name of the conflicting provider
        name: String,
        /// Tenant domain holding the conflict
        tenant_domain: String,
    },

    #[error("Invalid identity provider: {message}")]
    InvalidRecord {
        /// Description of what is wrong with the record
        message: String,
    },

    #[error("Operation '{operation}' on '{name}' vetoed by listener '{listener}'")]
    Vetoed {
        /// The operation that was refused
        operation: String,
        /// Provider the operation targeted
        name: String,
        /// Listener that refused it
        listener: String,
    },

    #[error("Listener '{listener}' failed: {message}")]
    Listener {
        /// Listener that failed
        listener: String,
        /// Failure description
        message: String,
    },

    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },
}

impl RegistryError {
    pub fn not_found(name: impl Into<String>, tenant_domain: impl Into<String>) -> Self {
        Self::NotFound {
            name: name.into(),
            tenant_domain: tenant_domain.into(),
        }
    }

    pub fn already_exists(name: impl Into<String>, tenant_domain: impl Into<String>) -> Self {
        Self::AlreadyExists {
            name: name.into(),
            tenant_domain: tenant_domain.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
