//! Shared provider detection.
//!
//! A provider is shared across tenants when its name starts with a reserved
//! prefix. Nothing else about the record is consulted.

use super::record::IdentityProvider;

/// Name prefix that marks a provider as shared.
pub const DEFAULT_SHARED_PREFIX: &str = "shared_";

/// Classifies records as shared or tenant-local by name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedRecordClassifier {
    prefix: String,
}

impl SharedRecordClassifier {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The reserved prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the record is present and its name carries the prefix.
    pub fn is_shared(&self, record: Option<&IdentityProvider>) -> bool {
        self.is_shared_name(record.map(IdentityProvider::name))
    }

    /// Whether the name is present and carries the prefix.
    ///
    /// A blank prefix marks nothing as shared.
    pub fn is_shared_name(&self, name: Option<&str>) -> bool {
        if self.prefix.trim().is_empty() {
            return false;
        }
        name.is_some_and(|name| name.starts_with(&self.prefix))
    }
}

impl Default for SharedRecordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SHARED_PREFIX)
    }
}
