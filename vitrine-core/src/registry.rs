//! Process-wide modal registry.
//!
//! A keyed store of [`ModalRecord`]s observed via subscription. Writes are
//! last-writer-wins per key; every write synchronously notifies all
//! subscribers with an immutable snapshot, so observers re-render in the
//! same UI-thread turn as the mutation. The registry is handed to consumers
//! as a cloneable handle rather than reached through a global.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::ids::ModalKey;
use crate::record::ModalRecord;

/// Immutable view of the registry contents at notification time.
pub type RegistrySnapshot = HashMap<ModalKey, ModalRecord>;

type Listener = Arc<dyn Fn(&RegistrySnapshot) + Send + Sync>;

#[derive(Default)]
struct Inner {
    records: HashMap<ModalKey, ModalRecord>,
    listeners: HashMap<u64, Listener>,
    next_listener_id: u64,
}

/// Shared handle to the modal record store.
#[derive(Clone, Default)]
pub struct ModalRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl std::fmt::Debug for ModalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ModalRegistry")
            .field("records", &inner.records)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the record for `key` and notify subscribers.
    pub fn open(&self, key: ModalKey, record: ModalRecord) {
        log::debug!("modal registry open: {key} ({})", record.kind);
        let listeners = {
            let mut inner = self.inner.write();
            inner.records.insert(key, record);
            Self::collect_listeners(&inner)
        };
        self.notify(listeners);
    }

    /// Mark the record for `key` closed. With `without_animation`, the modal
    /// renderer skips straight to the hidden state.
    pub fn close(&self, key: ModalKey, without_animation: bool) {
        log::debug!("modal registry close: {key} (without_animation={without_animation})");
        let listeners = {
            let mut inner = self.inner.write();
            if let Some(record) = inner.records.get_mut(&key) {
                record.is_open = false;
                record.close_without_animation = without_animation;
            }
            Self::collect_listeners(&inner)
        };
        self.notify(listeners);
    }

    /// Apply a partial mutation to the record for `key`, if present, and
    /// notify subscribers.
    pub fn update<F>(&self, key: ModalKey, f: F)
    where
        F: FnOnce(&mut ModalRecord),
    {
        let listeners = {
            let mut inner = self.inner.write();
            match inner.records.get_mut(&key) {
                Some(record) => f(record),
                None => {
                    log::trace!("modal registry update ignored, no record: {key}");
                    return;
                }
            }
            Self::collect_listeners(&inner)
        };
        self.notify(listeners);
    }

    /// Remove the record for `key` entirely (post-close cleanup) and notify.
    pub fn remove(&self, key: ModalKey) {
        let listeners = {
            let mut inner = self.inner.write();
            if inner.records.remove(&key).is_none() {
                return;
            }
            Self::collect_listeners(&inner)
        };
        self.notify(listeners);
    }

    pub fn get(&self, key: &ModalKey) -> Option<ModalRecord> {
        self.inner.read().records.get(key).cloned()
    }

    /// Snapshot of all records.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.inner.read().records.clone()
    }

    /// Register a listener invoked synchronously after every write. The
    /// returned [`Subscription`] unsubscribes when dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RegistrySnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.inner.write();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    fn collect_listeners(inner: &Inner) -> Vec<Listener> {
        inner.listeners.values().cloned().collect()
    }

    // Listeners run outside the lock so a listener may read the registry
    // (or even write it) without deadlocking.
    fn notify(&self, listeners: Vec<Listener>) {
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Guard for a registry subscription; dropping it removes the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RwLock<Inner>>,
}

impl Subscription {
    /// Explicit unsubscribe, equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.registry.upgrade() {
            inner.write().listeners.remove(&self.id);
        }
    }
}
