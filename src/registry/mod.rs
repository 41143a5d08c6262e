//! Delegate registry abstraction for persisted identity providers.
//!
//! The sync pass never owns provider persistence. It talks to an injected
//! [`ProviderRegistry`] that stores providers per tenant domain, the same way
//! the rest of the identity server would. Shared providers always go to the
//! root tenant domain.
//!
//! # Example Usage
//!
//! ```rust
//! use idp_registry::provider::IdentityProvider;
//! use idp_registry::registry::{InMemoryProviderRegistry, ProviderRegistry, SUPER_TENANT_DOMAIN};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = InMemoryProviderRegistry::new();
//! registry.add(IdentityProvider::new("shared_corp"), SUPER_TENANT_DOMAIN).await?;
//!
//! let found = registry.get_by_name("shared_corp", SUPER_TENANT_DOMAIN).await?;
//! assert!(found.is_some());
//!
//! registry.delete("shared_corp", SUPER_TENANT_DOMAIN).await?;
//! assert!(registry.list_all(SUPER_TENANT_DOMAIN).await?.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;
pub mod notifying;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::RegistryError;
pub use in_memory::InMemoryProviderRegistry;
pub use notifying::ListenerAwareRegistry;

use crate::provider::IdentityProvider;
use std::future::Future;

/// Domain name of the root tenant that owns shared providers.
pub const SUPER_TENANT_DOMAIN: &str = "carbon.super";

/// Name of the placeholder provider the registry hands back when a tenant has
/// no real provider under the requested name.
pub const DEFAULT_IDP_CONFIG: &str = "default";

/// Authoritative store for persisted identity providers.
///
/// Every operation is scoped to a tenant domain. Implementations decide how
/// records are persisted; callers only rely on these five operations.
pub trait ProviderRegistry: Send + Sync {
    /// The error type returned by registry operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a provider by name.
    fn get_by_name(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> impl Future<Output = Result<Option<IdentityProvider>, Self::Error>> + Send;

    /// Persist a new provider.
    fn add(
        &self,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Replace the provider currently stored under `name`.
    ///
    /// The new record may carry a different name, which renames the provider.
    fn update(
        &self,
        name: &str,
        idp: IdentityProvider,
        tenant_domain: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Remove a provider by name.
    fn delete(
        &self,
        name: &str,
        tenant_domain: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// All providers stored for the tenant.
    fn list_all(
        &self,
        tenant_domain: &str,
    ) -> impl Future<Output = Result<Vec<IdentityProvider>, Self::Error>> + Send;
}
