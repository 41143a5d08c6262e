//! Default listener guarding the resident identity provider.
//!
//! The resident provider represents the server itself and is managed through
//! its own configuration path. File-sourced or API-driven changes must never
//! create or overwrite a provider under its reserved name.

use super::IdentityProviderMgtListener;
use crate::provider::IdentityProvider;
use crate::registry::RegistryError;
use log::warn;

/// Reserved name of the resident identity provider.
pub const RESIDENT_IDP_RESERVED_NAME: &str = "LOCAL";

/// Listener registered on activation; refuses writes to the resident name.
#[derive(Debug, Clone, Default)]
pub struct ResidentIdentityProviderListener;

impl ResidentIdentityProviderListener {
    pub const NAME: &'static str = "resident-idp-listener";

    pub fn new() -> Self {
        Self
    }

    fn allows(&self, name: &str, operation: &str) -> bool {
        if name.eq_ignore_ascii_case(RESIDENT_IDP_RESERVED_NAME) {
            warn!(
                "Refusing {} of '{}': name is reserved for the resident identity provider",
                operation, name
            );
            return false;
        }
        true
    }
}

impl IdentityProviderMgtListener for ResidentIdentityProviderListener {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execution_order_id(&self) -> i32 {
        1
    }

    fn do_pre_add(
        &self,
        idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(self.allows(&idp.name, "add"))
    }

    fn do_pre_update(
        &self,
        _old_name: &str,
        idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(self.allows(&idp.name, "update"))
    }
}
