//! In-process publish/subscribe for grid events.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::events::types::{GridEvent, GridEventKind};

pub type Listener = Arc<dyn Fn(&GridEvent) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    kind: GridEventKind,
    callback: Listener,
}

#[derive(Default)]
struct BusInner {
    listeners: RwLock<Vec<ListenerEntry>>,
    next_id: AtomicU64,
}

impl BusInner {
    fn is_subscribed(&self, id: u64) -> bool {
        self.listeners.read().iter().any(|entry| entry.id == id)
    }

    fn remove(&self, id: u64) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        listeners.len() != before
    }
}

/// Typed event bus. Cloning yields another handle to the same listener set.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        kind: GridEventKind,
        callback: impl Fn(&GridEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().push(ListenerEntry {
            id,
            kind,
            callback: Arc::new(callback),
        });
        Subscription {
            id,
            kind,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self, kind: GridEventKind) -> usize {
        self.inner
            .listeners
            .read()
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Deliver `event` to every listener of its kind, synchronously.
    ///
    /// Listeners run without the registry lock held, so they may subscribe or
    /// unsubscribe freely. A listener removed earlier in the same broadcast is
    /// skipped; a panicking listener is logged and the rest still run.
    pub fn broadcast(&self, event: &GridEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(u64, Listener)> = self
            .inner
            .listeners
            .read()
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.id, entry.callback.clone()))
            .collect();

        let mut delivered = 0usize;
        for (id, callback) in targets {
            if !self.inner.is_subscribed(id) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => delivered += 1,
                Err(_) => warn!(event = %kind, listener = id, "grid event listener panicked"),
            }
        }
        trace!(event = %kind, delivered, "broadcast grid event");
        delivered
    }
}

/// Handle returned by [`EventBus::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    kind: GridEventKind,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn kind(&self) -> GridEventKind {
        self.kind
    }

    /// Returns false when the listener was already removed or the bus is gone.
    pub fn unsubscribe(&self) -> bool {
        match self.bus.upgrade() {
            Some(inner) => inner.remove(self.id),
            None => false,
        }
    }
}
