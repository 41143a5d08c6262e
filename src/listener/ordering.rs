//! Priority-ordered listener collection.

use super::IdentityProviderMgtListener;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Listeners sorted by execution order id.
///
/// Ties keep registration order. Registering a listener under a name that is
/// already present replaces the earlier registration.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    listeners: Arc<RwLock<Vec<Arc<dyn IdentityProviderMgtListener>>>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener at the position its execution order id dictates.
    pub async fn register(&self, listener: Arc<dyn IdentityProviderMgtListener>) {
        let mut listeners = self.listeners.write().await;
        listeners.retain(|existing| existing.name() != listener.name());

        let order = listener.execution_order_id();
        let position = listeners.partition_point(|existing| existing.execution_order_id() <= order);
        listeners.insert(position, listener);
    }

    /// Remove a listener by name, returning it if it was registered.
    pub async fn unregister(&self, name: &str) -> Option<Arc<dyn IdentityProviderMgtListener>> {
        let mut listeners = self.listeners.write().await;
        let index = listeners.iter().position(|listener| listener.name() == name)?;
        Some(listeners.remove(index))
    }

    /// Snapshot of all listeners in execution order.
    pub async fn listeners(&self) -> Vec<Arc<dyn IdentityProviderMgtListener>> {
        self.listeners.read().await.clone()
    }

    /// Snapshot of the enabled listeners in execution order.
    pub async fn enabled_listeners(&self) -> Vec<Arc<dyn IdentityProviderMgtListener>> {
        let listeners = self.listeners.read().await;
        listeners
            .iter()
            .filter(|listener| listener.is_enabled())
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.listeners.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listeners.read().await.is_empty()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry").finish_non_exhaustive()
    }
}
