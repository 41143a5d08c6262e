//! Identity provider management listeners.
//!
//! Listeners observe changes to persisted providers. Each one carries an
//! execution order id; the [`ListenerRegistry`] hands them out in ascending
//! order, keeping registration order among listeners that share an id.
//!
//! Pre hooks may refuse an operation by returning `Ok(false)`. Post hooks run
//! only after the delegate registry accepted the change.

pub mod ordering;
pub mod resident;

pub use ordering::ListenerRegistry;
pub use resident::{RESIDENT_IDP_RESERVED_NAME, ResidentIdentityProviderListener};

use crate::provider::IdentityProvider;
use crate::registry::RegistryError;

/// Hooks around delegate registry mutations.
///
/// All hooks default to "continue", so implementors only override what they
/// care about.
pub trait IdentityProviderMgtListener: Send + Sync {
    /// Unique name of the listener.
    fn name(&self) -> &str;

    /// Position in the execution chain; lower runs first.
    fn execution_order_id(&self) -> i32;

    /// Disabled listeners are skipped entirely.
    fn is_enabled(&self) -> bool {
        true
    }

    fn do_pre_add(
        &self,
        _idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(true)
    }

    fn do_post_add(
        &self,
        _idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(true)
    }

    fn do_pre_update(
        &self,
        _old_name: &str,
        _idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(true)
    }

    fn do_post_update(
        &self,
        _old_name: &str,
        _idp: &IdentityProvider,
        _tenant_domain: &str,
    ) -> Result<bool, RegistryError> {
        Ok(true)
    }

    fn do_pre_delete(&self, _name: &str, _tenant_domain: &str) -> Result<bool, RegistryError> {
        Ok(true)
    }

    fn do_post_delete(&self, _name: &str, _tenant_domain: &str) -> Result<bool, RegistryError> {
        Ok(true)
    }
}
