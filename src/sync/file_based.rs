//! Directory scan that synchronizes file-sourced identity providers.
//!
//! Each regular file directly inside the configuration directory holds one
//! provider document. Shared providers are pushed to the delegate registry
//! under the root tenant; every other provider is served locally from the
//! [`FileBasedIndex`] and never reaches the delegate.
//!
//! A failure on one file is logged and that file is skipped. Both indexes are
//! built from scratch during a scan and swapped in when it finishes, so a
//! provider whose file was removed does not survive the next scan.

use crate::provider::{IdentityProvider, ProviderRecordParser, SharedRecordClassifier};
use crate::registry::{DEFAULT_IDP_CONFIG, ProviderRegistry, SUPER_TENANT_DOMAIN};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read handle on the non-shared, file-sourced providers.
///
/// Clones share the same underlying map; a finished scan is visible to every
/// handle at once.
#[derive(Debug, Clone, Default)]
pub struct FileBasedIndex {
    providers: Arc<RwLock<HashMap<String, IdentityProvider>>>,
}

impl FileBasedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a provider by name.
    pub async fn get(&self, name: &str) -> Option<IdentityProvider> {
        self.providers.read().await.get(name).cloned()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.providers.read().await.contains_key(name)
    }

    /// Provider names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let providers = self.providers.read().await;
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy of the whole index.
    pub async fn snapshot(&self) -> HashMap<String, IdentityProvider> {
        self.providers.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.providers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.providers.read().await.is_empty()
    }

    async fn replace(&self, providers: HashMap<String, IdentityProvider>) {
        *self.providers.write().await = providers;
    }
}

/// Outcome of one directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub directory: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// False when the directory exists but could not be listed.
    pub completed: bool,
    /// Regular files considered.
    pub files_seen: usize,
    /// Distinct non-shared providers now in the file-based index.
    pub local: usize,
    pub shared_added: usize,
    pub shared_updated: usize,
    /// Files whose document carried nothing.
    pub skipped_empty: usize,
    /// Files that could not be read or parsed.
    pub failed: usize,
    /// Shared providers whose add or update was rejected by the delegate.
    pub delegate_failures: usize,
    /// Shared provider names seen on disk during this scan.
    pub shared_names: BTreeSet<String>,
}

impl ScanReport {
    fn start(directory: &Path) -> Self {
        let now = Utc::now();
        Self {
            directory: directory.to_path_buf(),
            started_at: now,
            finished_at: now,
            completed: true,
            files_seen: 0,
            local: 0,
            shared_added: 0,
            shared_updated: 0,
            skipped_empty: 0,
            failed: 0,
            delegate_failures: 0,
            shared_names: BTreeSet::new(),
        }
    }
}

/// Scans a configuration directory and reconciles file-sourced providers with
/// the local index and the delegate registry.
#[derive(Debug)]
pub struct FileBasedRegistrySync<R> {
    registry: Arc<R>,
    classifier: SharedRecordClassifier,
    tenant_domain: String,
    default_idp_name: String,
    file_based: FileBasedIndex,
    shared_names: Arc<RwLock<BTreeSet<String>>>,
}

impl<R: ProviderRegistry> FileBasedRegistrySync<R> {
    /// Create a sync pass with the default prefix, root tenant and placeholder name.
    pub fn new(registry: Arc<R>) -> Self {
        Self {
            registry,
            classifier: SharedRecordClassifier::default(),
            tenant_domain: SUPER_TENANT_DOMAIN.to_string(),
            default_idp_name: DEFAULT_IDP_CONFIG.to_string(),
            file_based: FileBasedIndex::new(),
            shared_names: Arc::new(RwLock::new(BTreeSet::new())),
        }
    }

    pub fn with_classifier(mut self, classifier: SharedRecordClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Tenant domain that receives shared providers.
    pub fn with_tenant_domain(mut self, tenant_domain: impl Into<String>) -> Self {
        self.tenant_domain = tenant_domain.into();
        self
    }

    /// Name the delegate uses for its "nothing found" placeholder record.
    pub fn with_default_idp_name(mut self, name: impl Into<String>) -> Self {
        self.default_idp_name = name.into();
        self
    }

    /// Read handle on the file-based index.
    pub fn file_based_idps(&self) -> FileBasedIndex {
        self.file_based.clone()
    }

    /// Shared names seen by the most recent scan.
    pub async fn shared_names(&self) -> BTreeSet<String> {
        self.shared_names.read().await.clone()
    }

    /// Scan `config_dir` once and synchronize both indexes and the delegate.
    ///
    /// Never fails: per-file and delegate errors are logged and counted in
    /// the returned report. A missing directory counts as zero providers.
    pub async fn scan_and_sync(&self, config_dir: &Path) -> ScanReport {
        let mut report = ScanReport::start(config_dir);
        let mut local: HashMap<String, IdentityProvider> = HashMap::new();
        let mut shared: BTreeSet<String> = BTreeSet::new();

        match self.list_files(config_dir).await {
            Ok(files) => {
                for path in files {
                    report.files_seen += 1;
                    self.sync_file(&path, &mut local, &mut shared, &mut report)
                        .await;
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "Identity provider directory {} does not exist, no file based providers loaded",
                    config_dir.display()
                );
            }
            Err(e) => {
                error!(
                    "Error while listing identity provider directory {}: {}",
                    config_dir.display(),
                    e
                );
                report.completed = false;
                report.finished_at = Utc::now();
                return report;
            }
        }

        report.local = local.len();
        report.shared_names = shared.clone();
        self.file_based.replace(local).await;
        *self.shared_names.write().await = shared;
        report.finished_at = Utc::now();

        info!(
            "Loaded providers from {}: {} local, {} shared ({} added, {} updated), {} failed",
            config_dir.display(),
            report.local,
            report.shared_names.len(),
            report.shared_added,
            report.shared_updated,
            report.failed
        );
        report
    }

    /// Regular files directly inside `dir`, sorted by path.
    ///
    /// Symlinks are followed; entries that resolve to directories are skipped.
    async fn list_files(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            match tokio::fs::metadata(&path).await {
                Ok(metadata) if metadata.is_dir() => {
                    debug!("Skipping sub-directory {}", path.display());
                }
                Ok(_) => files.push(path),
                Err(e) => {
                    // Let the per-file pass report it against this path
                    warn!("Cannot stat {}: {}", path.display(), e);
                    files.push(path);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    async fn sync_file(
        &self,
        path: &Path,
        local: &mut HashMap<String, IdentityProvider>,
        shared: &mut BTreeSet<String>,
        report: &mut ScanReport,
    ) {
        let idp = match ProviderRecordParser::load_from_file(path).await {
            Ok(Some(idp)) => idp,
            Ok(None) => {
                debug!("Skipping empty identity provider document {}", path.display());
                report.skipped_empty += 1;
                return;
            }
            Err(e) => {
                error!(
                    "Error while loading identity provider from {}: {}",
                    path.display(),
                    e
                );
                report.failed += 1;
                return;
            }
        };

        if !self.classifier.is_shared(Some(&idp)) {
            if local.contains_key(&idp.name) {
                warn!(
                    "Identity provider '{}' in {} overrides an earlier file with the same name",
                    idp.name,
                    path.display()
                );
            }
            local.insert(idp.name.clone(), idp);
            return;
        }

        let name = idp.name.clone();
        self.push_shared(idp, report).await;
        shared.insert(name);
    }

    /// Add or update a shared provider in the delegate registry.
    async fn push_shared(&self, idp: IdentityProvider, report: &mut ScanReport) {
        let name = idp.name.clone();
        let current = match self
            .registry
            .get_by_name(&name, &self.tenant_domain)
            .await
        {
            Ok(current) => current,
            Err(e) => {
                warn!(
                    "Lookup of shared identity provider '{}' failed, attempting add: {}",
                    name, e
                );
                None
            }
        };

        let exists = current.is_some_and(|current| current.name != self.default_idp_name);
        if exists {
            match self.registry.update(&name, idp, &self.tenant_domain).await {
                Ok(()) => {
                    debug!("Shared identity provider {} updated", name);
                    report.shared_updated += 1;
                }
                Err(e) => {
                    error!("Error while updating shared identity provider {}: {}", name, e);
                    report.delegate_failures += 1;
                }
            }
        } else {
            match self.registry.add(idp, &self.tenant_domain).await {
                Ok(()) => {
                    debug!("Shared identity provider {} added", name);
                    report.shared_added += 1;
                }
                Err(e) => {
                    error!("Error while adding shared identity provider {}: {}", name, e);
                    report.delegate_failures += 1;
                }
            }
        }
    }
}
