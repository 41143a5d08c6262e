//! Integration tests for the scan and reconcile passes.

mod common;

use common::{ConfigDir, ScriptedRegistry, init_logging};
use idp_registry::registry::{InMemoryProviderRegistry, ProviderRegistry, SUPER_TENANT_DOMAIN};
use idp_registry::{FileBasedRegistrySync, IdentityProvider, OrphanReconciler};
use std::collections::BTreeSet;
use std::sync::Arc;

#[tokio::test]
async fn local_only_directory_fills_index_and_leaves_shared_set_empty() {
    init_logging();
    let dir = ConfigDir::new();
    dir.provider("google.json", "Google");
    dir.provider("okta.json", "Okta");
    dir.provider("okta-copy.json", "Okta");
    let registry = Arc::new(ScriptedRegistry::new());
    let sync = FileBasedRegistrySync::new(registry.clone());

    let report = sync.scan_and_sync(dir.path()).await;

    assert_eq!(report.files_seen, 3);
    assert_eq!(sync.file_based_idps().names().await, vec!["Google", "Okta"]);
    assert!(sync.shared_names().await.is_empty());
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn shared_records_always_attempt_delegate_and_are_recorded() {
    init_logging();
    let dir = ConfigDir::new();
    dir.provider("a.json", "shared_A");
    dir.provider("b.json", "shared_B");
    let registry = Arc::new(ScriptedRegistry::new());
    registry.fail("add");
    let sync = FileBasedRegistrySync::new(registry.clone());

    let report = sync.scan_and_sync(dir.path()).await;

    assert_eq!(
        registry.calls(),
        vec!["get:shared_A", "add:shared_A", "get:shared_B", "add:shared_B"]
    );
    assert_eq!(report.delegate_failures, 2);
    let expected: BTreeSet<String> = ["shared_A", "shared_B"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(sync.shared_names().await, expected);
    assert!(sync.file_based_idps().is_empty().await);
}

#[tokio::test]
async fn scanning_unchanged_directory_is_idempotent() {
    let dir = ConfigDir::new();
    dir.provider("google.json", "Google");
    dir.provider("corp.json", "shared_corp");
    dir.raw("broken.json", "not json");
    let registry = Arc::new(InMemoryProviderRegistry::new());
    let sync = FileBasedRegistrySync::new(registry.clone());

    let first = sync.scan_and_sync(dir.path()).await;
    let index_after_first = sync.file_based_idps().snapshot().await;
    let shared_after_first = sync.shared_names().await;

    let second = sync.scan_and_sync(dir.path()).await;

    assert_eq!(sync.file_based_idps().snapshot().await, index_after_first);
    assert_eq!(sync.shared_names().await, shared_after_first);
    assert_eq!(first.shared_added, 1);
    assert_eq!(second.shared_updated, 1);
    assert_eq!(registry.names(SUPER_TENANT_DOMAIN).await, vec!["shared_corp"]);
}

#[tokio::test]
async fn reconcile_removes_exactly_the_missing_shared_records() {
    let registry = Arc::new(InMemoryProviderRegistry::new());
    for name in ["shared_A", "shared_B", "Google"] {
        registry
            .add(IdentityProvider::new(name), SUPER_TENANT_DOMAIN)
            .await
            .unwrap();
    }
    let reconciler = OrphanReconciler::new(registry.clone());
    let current: BTreeSet<String> = std::iter::once("shared_A".to_string()).collect();

    let report = reconciler.reconcile(&current).await;

    assert_eq!(report.deleted, vec!["shared_B"]);
    assert!(!report.aborted);
    assert_eq!(
        registry.names(SUPER_TENANT_DOMAIN).await,
        vec!["Google", "shared_A"]
    );
}

#[tokio::test]
async fn corrupt_file_is_isolated_from_siblings() {
    init_logging();
    let dir = ConfigDir::new();
    dir.provider("1-google.json", "Google");
    dir.raw("2-corrupt.json", r#"{"identityProviderName": 42}"#);
    dir.provider("3-corp.json", "shared_corp");
    let registry = Arc::new(ScriptedRegistry::new());
    let sync = FileBasedRegistrySync::new(registry.clone());

    let report = sync.scan_and_sync(dir.path()).await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.local, 1);
    assert_eq!(report.shared_added, 1);
    assert_eq!(registry.calls(), vec!["get:shared_corp", "add:shared_corp"]);
}

#[tokio::test]
async fn removed_shared_file_is_reconciled_away_on_next_pass() {
    let dir = ConfigDir::new();
    dir.provider("a.json", "shared_A");
    dir.provider("b.json", "shared_B");
    let registry = Arc::new(InMemoryProviderRegistry::new());
    let sync = FileBasedRegistrySync::new(registry.clone());
    let reconciler = OrphanReconciler::new(registry.clone());

    let report = sync.scan_and_sync(dir.path()).await;
    reconciler.reconcile(&report.shared_names).await;
    assert_eq!(registry.count(SUPER_TENANT_DOMAIN).await, 2);

    dir.remove("b.json");
    let report = sync.scan_and_sync(dir.path()).await;
    let reconciled = reconciler.reconcile(&report.shared_names).await;

    assert_eq!(reconciled.deleted, vec!["shared_B"]);
    assert_eq!(registry.names(SUPER_TENANT_DOMAIN).await, vec!["shared_A"]);
}

#[tokio::test]
async fn list_failure_aborts_reconciliation() {
    let registry = Arc::new(ScriptedRegistry::new());
    registry
        .store
        .add(IdentityProvider::new("shared_A"), SUPER_TENANT_DOMAIN)
        .await
        .unwrap();
    registry.fail("list");
    let reconciler = OrphanReconciler::new(registry.clone());

    let report = reconciler.reconcile(&BTreeSet::new()).await;

    assert!(report.aborted);
    assert_eq!(registry.calls(), vec![format!("list:{}", SUPER_TENANT_DOMAIN)]);
    assert_eq!(registry.store.count(SUPER_TENANT_DOMAIN).await, 1);
}
