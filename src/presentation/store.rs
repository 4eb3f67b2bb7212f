//! Key → payload stores, one per presentation kind.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::presentation::ids::PresentationIdContext;
use crate::presentation::registry::{PresentationIdProvider, PresentationIdRegistry};

/// Who is adding an entry. Only used for diagnostics today.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddContext<'a> {
    pub viewport_id: Option<&'a str>,
}

/// Process-lifetime store of presentation payloads keyed by identity key.
///
/// Every mutation publishes a fresh map, so holders of an older [`snapshot`] keep
/// seeing the old contents and `Arc::ptr_eq` tells them something changed.
///
/// [`snapshot`]: PresentationStore::snapshot
pub struct PresentationStore<T> {
    kind: String,
    entries: RwLock<Arc<HashMap<String, T>>>,
    provider: PresentationIdProvider,
}

impl<T: Clone> PresentationStore<T> {
    pub fn new(kind: impl Into<String>, provider: PresentationIdProvider) -> Self {
        Self {
            kind: kind.into(),
            entries: RwLock::new(Arc::new(HashMap::new())),
            provider,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.entries.read().get(key).cloned()
    }

    /// Insert or overwrite the entry for `key`.
    pub fn set(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        self.replace_with(|map| {
            map.insert(key, value);
        });
    }

    /// Same effect as [`set`](Self::set); kept separate so merge rules can diverge.
    pub fn add(&self, key: impl Into<String>, value: T, context: AddContext<'_>) {
        let key = key.into();
        debug!(
            kind = %self.kind,
            key = %key,
            viewport_id = context.viewport_id.unwrap_or("-"),
            "adding presentation"
        );
        self.set(key, value);
    }

    pub fn remove(&self, key: &str) -> Option<T> {
        let mut removed = None;
        self.replace_with(|map| removed = map.remove(key));
        removed
    }

    /// Drop every entry. Safe on an empty store.
    pub fn clear(&self) {
        *self.entries.write() = Arc::new(HashMap::new());
    }

    pub fn snapshot(&self) -> Arc<HashMap<String, T>> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Identity key for a pane, answered by this store's provider.
    pub fn get_presentation_id(&self, kind: &str, ctx: &PresentationIdContext<'_>) -> Option<String> {
        (self.provider)(kind, ctx).filter(|key| !key.is_empty())
    }

    /// Install this store's provider under its kind.
    pub fn register_provider(&self, registry: &PresentationIdRegistry) {
        registry.register(self.kind.clone(), self.provider.clone());
    }

    fn replace_with(&self, mutate: impl FnOnce(&mut HashMap<String, T>)) {
        let mut guard = self.entries.write();
        let mut next: HashMap<String, T> = guard.as_ref().clone();
        mutate(&mut next);
        *guard = Arc::new(next);
    }
}
