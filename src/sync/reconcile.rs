//! Removal of shared providers whose configuration file is gone.
//!
//! The configuration directory decides which shared providers should exist.
//! Any shared provider the delegate still holds for the root tenant without a
//! matching name from the latest scan is an orphan and gets deleted.

use crate::provider::SharedRecordClassifier;
use crate::registry::{ProviderRegistry, SUPER_TENANT_DOMAIN};
use log::{debug, error, info};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records returned by the delegate listing.
    pub examined: usize,
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
    /// The delegate listing failed and nothing was attempted.
    pub aborted: bool,
}

/// Deletes orphaned shared providers from the delegate registry.
#[derive(Debug)]
pub struct OrphanReconciler<R> {
    registry: Arc<R>,
    classifier: SharedRecordClassifier,
    tenant_domain: String,
}

impl<R: ProviderRegistry> OrphanReconciler<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self {
            registry,
            classifier: SharedRecordClassifier::default(),
            tenant_domain: SUPER_TENANT_DOMAIN.to_string(),
        }
    }

    pub fn with_classifier(mut self, classifier: SharedRecordClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_tenant_domain(mut self, tenant_domain: impl Into<String>) -> Self {
        self.tenant_domain = tenant_domain.into();
        self
    }

    /// Delete every shared provider not named in `current_shared_names`.
    pub async fn reconcile(&self, current_shared_names: &BTreeSet<String>) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let providers = match self.registry.list_all(&self.tenant_domain).await {
            Ok(providers) => providers,
            Err(e) => {
                error!(
                    "Error loading identity providers of tenant {}: {}",
                    self.tenant_domain, e
                );
                report.aborted = true;
                return report;
            }
        };
        report.examined = providers.len();

        let orphans = providers.into_iter().filter(|idp| {
            self.classifier.is_shared(Some(idp)) && !current_shared_names.contains(&idp.name)
        });

        for idp in orphans {
            match self.registry.delete(&idp.name, &self.tenant_domain).await {
                Ok(()) => {
                    debug!("Deleted shared identity provider with the name: {}", idp.name);
                    report.deleted.push(idp.name);
                }
                Err(e) => {
                    error!("Error when deleting identity provider {}: {}", idp.name, e);
                    report.failed.push(idp.name);
                }
            }
        }

        if !report.deleted.is_empty() {
            info!(
                "Removed {} shared identity providers without a configuration file",
                report.deleted.len()
            );
        }
        report
    }
}
