//! Registry test double with injectable failures.

use super::{InMemoryProviderRegistry, ProviderRegistry, RegistryError};
use crate::provider::IdentityProvider;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory registry that fails selected operations and records calls.
#[derive(Clone, Default)]
pub(crate) struct FlakyRegistry {
    pub(crate) inner: InMemoryProviderRegistry,
    failing: Arc<Mutex<HashSet<&'static str>>>,
    failing_names: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FlakyRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` fail.
    pub(crate) fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    /// Make every mutation of `name` fail.
    pub(crate) fn fail_name(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, operation: &'static str, name: &str) -> Result<(), RegistryError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, name));
        if self.failing.lock().unwrap().contains(operation)
            || self.failing_names.lock().unwrap().contains(name)
        {
            return Err(RegistryError::storage(format!(
                "injected {} failure for '{}'",
                operation, name
            )));
        }
        Ok(())
    }
}

impl ProviderRegistry for FlakyRegistry {
    type Error = RegistryError;

    async fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> Result<Option<IdentityProvider>, Self::Error> {
        if self.failing.lock().unwrap().contains("get") {
            return Err(RegistryError::storage("injected get failure"));
        }
        self.inner.get_by_name(name, tenant_domain).await
    }

    async fn add(&self, idp: IdentityProvider, tenant_domain: &str) -> Result<(), Self::Error> {
        self.check("add", &idp.name)?;
        self.inner.add(idp, tenant_domain).await
    }

    async fn update(
        &self,
        name: &str,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> Result<(), Self::Error> {
        self.check("update", name)?;
        self.inner.update(name, idp, tenant_domain).await
    }

    async fn delete(&self, name: &str, tenant_domain: &str) -> Result<(), Self::Error> {
        self.check("delete", name)?;
        self.inner.delete(name, tenant_domain).await
    }

    async fn list_all(&self, tenant_domain: &str) -> Result<Vec<IdentityProvider>, Self::Error> {
        if self.failing.lock().unwrap().contains("list") {
            return Err(RegistryError::storage("injected list failure"));
        }
        self.inner.list_all(tenant_domain).await
    }
}
