//! Subscription types for store lifecycle events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Weak;

/// Published on the before-channel, strictly before the mapping changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeforeSet<T> {
    /// The record currently stored under the incoming key, if any.
    pub prior: Option<T>,
    /// The record about to be written.
    pub incoming: T,
}

/// Published on the after-channel, once the write is visible to readers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AfterSet<T> {
    pub committed: T,
}

/// Unique identifier for a listener within one notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-erased view of a notifier's listener list, so handles need not
/// carry the event type.
pub(crate) trait Registry: Send + Sync {
    fn remove(&self, id: ListenerId) -> bool;
    fn contains(&self, id: ListenerId) -> bool;
}

/// Handle to a registered listener.
///
/// Calling [`unsubscribe`](Self::unsubscribe) removes exactly this listener;
/// further calls are no-ops. Dropping the handle leaves the listener
/// registered.
pub struct Subscription {
    id: ListenerId,
    registry: Weak<dyn Registry>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: Weak<dyn Registry>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns true only on the call that removed it.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.contains(self.id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
