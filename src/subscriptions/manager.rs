//! Notifier: ordered, synchronous fan-out for one event type.

use crate::error::{Result, StoreError};
use crossbeam_channel::{bounded, Receiver, TrySendError};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use super::types::{ListenerId, Registry, Subscription};

/// A listener callback. Returning `Err` aborts the rest of the publish.
pub type Listener<E> = dyn Fn(&E) -> Result<()> + Send + Sync;

struct Slot<E> {
    id: ListenerId,
    listener: Arc<Listener<E>>,
}

/// Listeners in subscription order.
struct ListenerList<E> {
    slots: RwLock<Vec<Slot<E>>>,
}

impl<E> Registry for ListenerList<E> {
    fn remove(&self, id: ListenerId) -> bool {
        let mut slots = self.slots.write();
        let before = slots.len();
        slots.retain(|slot| slot.id != id);

        let removed = slots.len() != before;
        if removed {
            tracing::trace!(listener = %id, remaining = slots.len(), "listener removed");
        }
        removed
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.slots.read().iter().any(|slot| slot.id == id)
    }
}

/// Publish/subscribe primitive for a single event type.
///
/// `publish` runs listeners synchronously, in the order they subscribed,
/// over a snapshot of the listener list taken when the publish starts.
/// Listeners added or removed mid-publish take effect from the next publish.
///
/// Listener failures are not swallowed: the first `Err` stops the fan-out
/// and is returned to the publisher. Panics unwind through `publish` the
/// same way.
pub struct Notifier<E> {
    list: Arc<ListenerList<E>>,
    /// Counter for generating listener IDs.
    next_id: AtomicU64,
}

impl<E: 'static> Notifier<E> {
    /// Create a notifier with no listeners.
    pub fn new() -> Self {
        Self {
            list: Arc::new(ListenerList {
                slots: RwLock::new(Vec::new()),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener for every future publish.
    ///
    /// Subscribing the same closure twice registers two independent listeners.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) -> Result<()> + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.attach(id, Arc::new(listener))
    }

    /// Forward every published event into a bounded channel.
    ///
    /// A full buffer fails the publish with [`StoreError::SubscriberLagged`].
    /// Once the receiver is dropped, events are discarded silently.
    pub fn subscribe_channel(&self, buffer_size: usize) -> (Subscription, Receiver<E>)
    where
        E: Clone + Send,
    {
        let id = self.allocate_id();
        let (sender, receiver) = bounded(buffer_size.max(1));

        let forward = move |event: &E| match sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(StoreError::SubscriberLagged(id)),
            Err(TrySendError::Disconnected(_)) => {
                tracing::trace!(listener = %id, "channel receiver gone, dropping event");
                Ok(())
            }
        };

        (self.attach(id, Arc::new(forward)), receiver)
    }

    /// Invoke every listener registered at call time, in subscription order.
    pub fn publish(&self, event: &E) -> Result<()> {
        let snapshot: Vec<(ListenerId, Arc<Listener<E>>)> = self
            .list
            .slots
            .read()
            .iter()
            .map(|slot| (slot.id, Arc::clone(&slot.listener)))
            .collect();

        for (id, listener) in snapshot {
            if let Err(e) = listener(event) {
                tracing::debug!(listener = %id, error = %e, "publish aborted by listener");
                return Err(e);
            }
        }

        Ok(())
    }

    /// Get listener count.
    pub fn listener_count(&self) -> usize {
        self.list.slots.read().len()
    }

    fn allocate_id(&self) -> ListenerId {
        ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn attach(&self, id: ListenerId, listener: Arc<Listener<E>>) -> Subscription {
        self.list.slots.write().push(Slot { id, listener });

        let list: Weak<ListenerList<E>> = Arc::downgrade(&self.list);
        let registry: Weak<dyn Registry> = list;
        Subscription::new(id, registry)
    }
}

impl<E: 'static> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.list.slots.read().len())
            .finish()
    }
}
