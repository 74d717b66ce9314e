use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{models::BackendKind, services::providers::Backend};

/// Identity of a constructed backend handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendKey {
    pub kind: BackendKind,
    pub model: String,
}

impl BackendKey {
    pub fn new(kind: BackendKind, model: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
        }
    }
}

/// Single-slot cache for the active generation backend
///
/// Backends are expensive to construct (model load, client setup), so the
/// handle for the current (kind, model) selection is kept and reused.
/// Selecting a different kind or model replaces the slot; there is never
/// more than one live backend.
#[derive(Clone, Default)]
pub struct BackendCache {
    slot: Arc<RwLock<Option<(BackendKey, Arc<Backend>)>>>,
}

impl BackendCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `key`, if the slot currently holds it
    pub async fn get(&self, key: &BackendKey) -> Option<Arc<Backend>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|(cached_key, _)| cached_key == key)
            .map(|(_, backend)| Arc::clone(backend))
    }

    /// Stores `backend` as the active handle, replacing any previous one
    pub async fn put(&self, key: BackendKey, backend: Arc<Backend>) {
        let mut slot = self.slot.write().await;
        if let Some((old_key, _)) = slot.as_ref() {
            if *old_key != key {
                tracing::info!(
                    old_kind = %old_key.kind,
                    old_model = %old_key.model,
                    new_kind = %key.kind,
                    new_model = %key.model,
                    "Replacing cached backend"
                );
            }
        }
        *slot = Some((key, backend));
    }

    /// Drops whatever handle is cached
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}
