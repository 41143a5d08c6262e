//! Common test utilities for registry sync integration tests.
//!
//! Provides a scratch configuration directory with document helpers and a
//! delegate registry double that records calls and fails on demand.

#![allow(dead_code)]

use idp_registry::registry::{InMemoryProviderRegistry, ProviderRegistry, RegistryError};
use idp_registry::IdentityProvider;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Initialize logging once; honours RUST_LOG.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temporary identity provider configuration directory.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a minimal provider document.
    pub fn provider(&self, file: &str, name: &str) -> PathBuf {
        self.raw(file, &format!(r#"{{"identityProviderName": "{}"}}"#, name))
    }

    /// Write arbitrary file content.
    pub fn raw(&self, file: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(file);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn remove(&self, file: &str) {
        std::fs::remove_file(self.dir.path().join(file)).expect("remove fixture");
    }
}

/// Delegate registry double that records mutations and fails selected ones.
#[derive(Clone, Default)]
pub struct ScriptedRegistry {
    pub store: InMemoryProviderRegistry,
    failing: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call of an operation: "get", "add", "update", "delete" or "list".
    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &str, name: &str) -> Result<(), RegistryError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, name));
        if self.failing.lock().unwrap().contains(operation) {
            return Err(RegistryError::storage(format!("{} unavailable", operation)));
        }
        Ok(())
    }
}

impl ProviderRegistry for ScriptedRegistry {
    type Error = RegistryError;

    async fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> Result<Option<IdentityProvider>, Self::Error> {
        self.record("get", name)?;
        self.store.get_by_name(name, tenant_domain).await
    }

    async fn add(&self, idp: IdentityProvider, tenant_domain: &str) -> Result<(), Self::Error> {
        self.record("add", &idp.name)?;
        self.store.add(idp, tenant_domain).await
    }

    async fn update(
        &self,
        name: &str,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> Result<(), Self::Error> {
        self.record("update", name)?;
        self.store.update(name, idp, tenant_domain).await
    }

    async fn delete(&self, name: &str, tenant_domain: &str) -> Result<(), Self::Error> {
        self.record("delete", name)?;
        self.store.delete(name, tenant_domain).await
    }

    async fn list_all(&self, tenant_domain: &str) -> Result<Vec<IdentityProvider>, Self::Error> {
        self.record("list", tenant_domain)?;
        self.store.list_all(tenant_domain).await
    }
}
