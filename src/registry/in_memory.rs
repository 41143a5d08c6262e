//! In-memory delegate registry.
//!
//! Thread-safe implementation of [`ProviderRegistry`] backed by nested maps:
//! `tenant_domain` → `provider name` → `record`. Suitable for tests,
//! development, and hosts that keep providers only for the process lifetime.

use super::{ProviderRegistry, RegistryError};
use crate::provider::IdentityProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory provider registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderRegistry {
    // Structure: tenant_domain -> name -> record
    data: Arc<RwLock<HashMap<String, HashMap<String, IdentityProvider>>>>,
}

impl InMemoryProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of providers stored for a tenant.
    pub async fn count(&self, tenant_domain: &str) -> usize {
        let data_guard = self.data.read().await;
        data_guard.get(tenant_domain).map_or(0, HashMap::len)
    }

    /// Names of the providers stored for a tenant, sorted.
    pub async fn names(&self, tenant_domain: &str) -> Vec<String> {
        let data_guard = self.data.read().await;
        let mut names: Vec<String> = data_guard
            .get(tenant_domain)
            .map(|tenant_data| tenant_data.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl ProviderRegistry for InMemoryProviderRegistry {
    type Error = RegistryError;

    async fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> Result<Option<IdentityProvider>, Self::Error> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(tenant_domain)
            .and_then(|tenant_data| tenant_data.get(name))
            .cloned())
    }

    async fn add(&self, idp: IdentityProvider, tenant_domain: &str) -> Result<(), Self::Error> {
        if idp.name.trim().is_empty() {
            return Err(RegistryError::InvalidRecord {
                message: "identity provider name cannot be empty".to_string(),
            });
        }

        let mut data_guard = self.data.write().await;
        let tenant_data = data_guard.entry(tenant_domain.to_string()).or_default();

        if tenant_data.contains_key(&idp.name) {
            return Err(RegistryError::already_exists(&idp.name, tenant_domain));
        }

        tenant_data.insert(idp.name.clone(), idp);
        Ok(())
    }

    async fn update(
        &self,
        name: &str,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> Result<(), Self::Error> {
        let mut data_guard = self.data.write().await;
        let tenant_data = data_guard
            .get_mut(tenant_domain)
            .filter(|tenant_data| tenant_data.contains_key(name))
            .ok_or_else(|| RegistryError::not_found(name, tenant_domain))?;

        if idp.name != name && tenant_data.contains_key(&idp.name) {
            return Err(RegistryError::already_exists(&idp.name, tenant_domain));
        }

        tenant_data.remove(name);
        tenant_data.insert(idp.name.clone(), idp);
        Ok(())
    }

    async fn delete(&self, name: &str, tenant_domain: &str) -> Result<(), Self::Error> {
        let mut data_guard = self.data.write().await;
        data_guard
            .get_mut(tenant_domain)
            .and_then(|tenant_data| tenant_data.remove(name))
            .map(|_| ())
            .ok_or_else(|| RegistryError::not_found(name, tenant_domain))
    }

    async fn list_all(&self, tenant_domain: &str) -> Result<Vec<IdentityProvider>, Self::Error> {
        let data_guard = self.data.read().await;
        let mut providers: Vec<IdentityProvider> = data_guard
            .get(tenant_domain)
            .map(|tenant_data| tenant_data.values().cloned().collect())
            .unwrap_or_default();

        // Consistent ordering for callers that log or diff the list
        providers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(providers)
    }
}
