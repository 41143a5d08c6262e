//! File-based identity provider registry for multi-tenant identity servers.
//!
//! Loads identity provider documents from a configuration directory, serves
//! tenant-local providers from an in-process index, pushes shared providers to
//! a pluggable delegate registry, and removes shared providers whose file was
//! deleted.
//!
//! # Core Components
//!
//! - [`IdpManagementComponent`] - Activation lifecycle and accessors
//! - [`ProviderRegistry`] - Trait for implementing delegate registries
//! - [`FileBasedRegistrySync`] - Directory scan and delegate add/update
//! - [`OrphanReconciler`] - Removal of shared providers without a file
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use idp_registry::{ComponentConfig, IdpManagementComponent};
//! use idp_registry::registry::InMemoryProviderRegistry;
//!
//! # async fn example() -> idp_registry::IdpMgtResult<()> {
//! let config = ComponentConfig::from_carbon_config_dir("/opt/is/repository/conf");
//! let component = IdpManagementComponent::new(config, InMemoryProviderRegistry::new())?;
//! let report = component.activate().await;
//! assert!(report.scan.completed);
//! # Ok(())
//! # }
//! ```

pub mod component;
pub mod error;
pub mod listener;
pub mod provider;
pub mod registry;
pub mod sync;

// Re-export commonly used types for convenience
pub use component::{ComponentConfig, IdpManagementComponent, SyncReport};
pub use error::{IdpMgtError, IdpMgtResult};
pub use listener::{IdentityProviderMgtListener, ListenerRegistry};
pub use provider::{IdentityProvider, ProviderRecordParser, SharedRecordClassifier};
pub use registry::{InMemoryProviderRegistry, ProviderRegistry, RegistryError};
pub use sync::{
    FileBasedIndex, FileBasedRegistrySync, OrphanReconciler, ReconcileReport, ScanReport,
};
