//! Registry decorator that runs management listeners around mutations.
//!
//! Enabled listeners run in execution order. A pre hook returning `false`
//! stops the chain and the operation is reported as
//! [`RegistryError::Vetoed`] without reaching the inner registry. Post hooks
//! run only after the inner registry applied the change, so they cannot fail
//! the operation: a post hook returning `false` or an error stops the
//! remaining post hooks, and the error is logged.

use super::{ProviderRegistry, RegistryError};
use crate::listener::{IdentityProviderMgtListener, ListenerRegistry};
use crate::provider::IdentityProvider;
use log::{debug, warn};
use std::sync::Arc;

/// Wraps a [`ProviderRegistry`] and notifies listeners of every mutation.
#[derive(Debug, Clone)]
pub struct ListenerAwareRegistry<R> {
    inner: R,
    listeners: ListenerRegistry,
}

impl<R> ListenerAwareRegistry<R>
where
    R: ProviderRegistry,
    R::Error: Into<RegistryError>,
{
    pub fn new(inner: R, listeners: ListenerRegistry) -> Self {
        Self { inner, listeners }
    }

    /// The wrapped registry.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    fn vetoed(operation: &str, name: &str, listener: &str) -> RegistryError {
        debug!(
            "Listener '{}' vetoed {} of identity provider '{}'",
            listener, operation, name
        );
        RegistryError::Vetoed {
            operation: operation.to_string(),
            name: name.to_string(),
            listener: listener.to_string(),
        }
    }

    fn run_post_hooks<F>(
        listeners: &[Arc<dyn IdentityProviderMgtListener>],
        operation: &str,
        name: &str,
        hook: F,
    ) where
        F: Fn(&dyn IdentityProviderMgtListener) -> Result<bool, RegistryError>,
    {
        for listener in listeners {
            match hook(listener.as_ref()) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(
                        "Listener '{}' failed after {} of identity provider '{}': {}",
                        listener.name(),
                        operation,
                        name,
                        e
                    );
                    break;
                }
            }
        }
    }
}

impl<R> ProviderRegistry for ListenerAwareRegistry<R>
where
    R: ProviderRegistry,
    R::Error: Into<RegistryError>,
{
    type Error = RegistryError;

    async fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> Result<Option<IdentityProvider>, Self::Error> {
        self.inner
            .get_by_name(name, tenant_domain)
            .await
            .map_err(Into::into)
    }

    async fn add(&self, idp: IdentityProvider, tenant_domain: &str) -> Result<(), Self::Error> {
        let listeners = self.listeners.enabled_listeners().await;

        for listener in &listeners {
            if !listener.do_pre_add(&idp, tenant_domain)? {
                return Err(Self::vetoed("add", &idp.name, listener.name()));
            }
        }

        self.inner
            .add(idp.clone(), tenant_domain)
            .await
            .map_err(Into::<RegistryError>::into)?;

        Self::run_post_hooks(&listeners, "add", &idp.name, |listener| {
            listener.do_post_add(&idp, tenant_domain)
        });
        Ok(())
    }

    async fn update(
        &self,
        name: &str,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> Result<(), Self::Error> {
        let listeners = self.listeners.enabled_listeners().await;

        for listener in &listeners {
            if !listener.do_pre_update(name, &idp, tenant_domain)? {
                return Err(Self::vetoed("update", name, listener.name()));
            }
        }

        self.inner
            .update(name, idp.clone(), tenant_domain)
            .await
            .map_err(Into::<RegistryError>::into)?;

        Self::run_post_hooks(&listeners, "update", name, |listener| {
            listener.do_post_update(name, &idp, tenant_domain)
        });
        Ok(())
    }

    async fn delete(&self, name: &str, tenant_domain: &str) -> Result<(), Self::Error> {
        let listeners = self.listeners.enabled_listeners().await;

        for listener in &listeners {
            if !listener.do_pre_delete(name, tenant_domain)? {
                return Err(Self::vetoed("delete", name, listener.name()));
            }
        }

        self.inner
            .delete(name, tenant_domain)
            .await
            .map_err(Into::<RegistryError>::into)?;

        Self::run_post_hooks(&listeners, "delete", name, |listener| {
            listener.do_post_delete(name, tenant_domain)
        });
        Ok(())
    }

    async fn list_all(&self, tenant_domain: &str) -> Result<Vec<IdentityProvider>, Self::Error> {
        self.inner.list_all(tenant_domain).await.map_err(Into::into)
    }
}
