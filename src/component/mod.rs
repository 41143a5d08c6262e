//! Lifecycle of the identity provider management component.
//!
//! The component owns the listener chain, the file-based index and the
//! delegate registry handle. On activation it registers the resident
//! provider listener, scans the configuration directory and removes orphaned
//! shared providers. Sibling code reads state through the accessors instead
//! of process-wide globals.
//!
//! # Example
//!
//! ```rust,no_run
//! use idp_registry::component::{ComponentConfig, IdpManagementComponent};
//! use idp_registry::registry::InMemoryProviderRegistry;
//!
//! # async fn example() -> idp_registry::IdpMgtResult<()> {
//! let config = ComponentConfig::from_carbon_config_dir("/opt/is/repository/conf");
//! let component = IdpManagementComponent::new(config, InMemoryProviderRegistry::new())?;
//!
//! let report = component.activate().await;
//! println!("{} local providers", report.scan.local);
//!
//! let google = component.file_based_idps().get("Google").await;
//! # let _ = google;
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use config::{ComponentConfig, ComponentConfigBuilder};

use crate::error::IdpMgtResult;
use crate::listener::{
    IdentityProviderMgtListener, ListenerRegistry, ResidentIdentityProviderListener,
};
use crate::provider::SharedRecordClassifier;
use crate::registry::{ListenerAwareRegistry, ProviderRegistry, RegistryError};
use crate::sync::{
    FileBasedIndex, FileBasedRegistrySync, OrphanReconciler, ReconcileReport, ScanReport,
};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of one scan-then-reconcile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub scan: ScanReport,
    /// `None` when the scan could not list the directory and reconciliation
    /// was skipped.
    pub reconcile: Option<ReconcileReport>,
}

/// Identity provider management component.
pub struct IdpManagementComponent<R> {
    config: ComponentConfig,
    listeners: ListenerRegistry,
    registry: Arc<ListenerAwareRegistry<R>>,
    sync: FileBasedRegistrySync<ListenerAwareRegistry<R>>,
    reconciler: OrphanReconciler<ListenerAwareRegistry<R>>,
    pass_lock: Mutex<()>,
}

impl<R> IdpManagementComponent<R>
where
    R: ProviderRegistry,
    R::Error: Into<RegistryError>,
{
    /// Wire the component around a delegate registry.
    ///
    /// Every delegate mutation goes through the component's listener chain.
    /// Fails with [`IdpMgtError::InvalidConfig`](crate::IdpMgtError::InvalidConfig)
    /// when the configuration does not pass [`ComponentConfig::validate`].
    pub fn new(config: ComponentConfig, registry: R) -> IdpMgtResult<Self> {
        config.validate()?;

        let listeners = ListenerRegistry::new();
        let registry = Arc::new(ListenerAwareRegistry::new(registry, listeners.clone()));
        let classifier = SharedRecordClassifier::new(config.shared_prefix.clone());

        let sync = FileBasedRegistrySync::new(registry.clone())
            .with_classifier(classifier.clone())
            .with_tenant_domain(config.tenant_domain.clone())
            .with_default_idp_name(config.default_idp_name.clone());
        let reconciler = OrphanReconciler::new(registry.clone())
            .with_classifier(classifier)
            .with_tenant_domain(config.tenant_domain.clone());

        Ok(Self {
            config,
            listeners,
            registry,
            sync,
            reconciler,
            pass_lock: Mutex::new(()),
        })
    }

    /// Register the default listener and load providers from disk.
    ///
    /// Never fails; problems are logged and reflected in the report.
    pub async fn activate(&self) -> SyncReport {
        self.listeners
            .register(Arc::new(ResidentIdentityProviderListener::new()))
            .await;
        debug!("Identity Provider Management - resident identity provider listener registered");

        let report = self.run_pass().await;
        debug!("Identity Provider Management component is activated");
        report
    }

    pub fn deactivate(&self) {
        debug!("Identity Provider Management component is deactivated");
    }

    /// Repeat the scan and reconciliation on demand.
    pub async fn rescan(&self) -> SyncReport {
        self.run_pass().await
    }

    async fn run_pass(&self) -> SyncReport {
        let _guard = self.pass_lock.lock().await;

        let scan = self.sync.scan_and_sync(&self.config.config_dir).await;
        if !scan.completed {
            warn!(
                "Skipping removal of shared identity providers: {} could not be read",
                self.config.config_dir.display()
            );
            return SyncReport {
                scan,
                reconcile: None,
            };
        }

        let reconcile = self.reconciler.reconcile(&scan.shared_names).await;
        info!(
            "Identity provider sync finished: {} local, {} shared, {} orphans removed",
            scan.local,
            scan.shared_names.len(),
            reconcile.deleted.len()
        );
        SyncReport {
            scan,
            reconcile: Some(reconcile),
        }
    }

    /// Non-shared providers loaded from the configuration directory.
    pub fn file_based_idps(&self) -> FileBasedIndex {
        self.sync.file_based_idps()
    }

    /// Listeners in execution order.
    pub async fn listeners(&self) -> Vec<Arc<dyn IdentityProviderMgtListener>> {
        self.listeners.listeners().await
    }

    pub fn listener_registry(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub async fn register_listener(&self, listener: Arc<dyn IdentityProviderMgtListener>) {
        debug!(
            "Registering identity provider listener '{}' with order {}",
            listener.name(),
            listener.execution_order_id()
        );
        self.listeners.register(listener).await;
    }

    pub async fn unregister_listener(
        &self,
        name: &str,
    ) -> Option<Arc<dyn IdentityProviderMgtListener>> {
        self.listeners.unregister(name).await
    }

    /// Delegate registry wrapped with the listener chain.
    pub fn registry(&self) -> &Arc<ListenerAwareRegistry<R>> {
        &self.registry
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }
}
