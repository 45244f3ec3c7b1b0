//! Main RecordStore struct tying the table and its hooks together.

use crate::error::Result;
use crate::records::RecordIndex;
use crate::selection::{self, SelectionPolicy};
use crate::subscriptions::{AfterSet, BeforeSet, Notifier, Subscription};
use crate::types::{Keyed, StoreStats};
use crossbeam_channel::Receiver;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Name used in log output.
    pub name: String,

    /// Number of keys to preallocate.
    pub capacity: usize,

    /// Policy used by [`RecordStore::select_best`].
    pub selection: SelectionPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "records".to_string(),
            capacity: 0,
            selection: SelectionPolicy::ZeroFloor,
        }
    }
}

/// An in-process keyed record store with lifecycle hooks.
///
/// Provides:
/// - Lookup by identity key and full scans in first-write order
/// - Before/after notifications around every `set`
/// - Score-based selection over the current records
///
/// There is no global instance: construct one and pass it (usually behind
/// an `Arc`) to whatever needs it. Internal locks are never held while
/// listeners or visitors run, so a listener may read the store it is
/// attached to. Sequences of calls are not atomic with respect to other
/// threads; callers sharing a store across threads must serialize access
/// themselves.
pub struct RecordStore<T: Keyed> {
    /// Store configuration.
    config: StoreConfig,

    /// Current records.
    index: RecordIndex<T>,

    /// Fired before the table changes.
    before_add: Notifier<BeforeSet<T>>,

    /// Fired after the table changes.
    after_add: Notifier<AfterSet<T>>,

    /// Committed writes.
    writes: AtomicU64,
}

impl<T> RecordStore<T>
where
    T: Keyed + Clone + 'static,
{
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store.
    pub fn with_config(config: StoreConfig) -> Self {
        tracing::debug!(
            store = %config.name,
            capacity = config.capacity,
            selection = ?config.selection,
            "creating record store"
        );

        Self {
            index: RecordIndex::with_capacity(config.capacity),
            config,
            before_add: Notifier::new(),
            after_add: Notifier::new(),
            writes: AtomicU64::new(0),
        }
    }

    // --- Record Operations ---

    /// Get the record stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key)
    }

    /// Insert or overwrite a record.
    ///
    /// 1. Publishes [`BeforeSet`] with the prior record (if any). Listeners
    ///    still see the old value in the store.
    /// 2. Writes the record.
    /// 3. Publishes [`AfterSet`]. Listeners see the new value.
    ///
    /// A failing before-listener leaves the store untouched and skips the
    /// after-round. A failing after-listener leaves the write committed.
    /// Either way the error is returned as-is.
    pub fn set(&self, record: T) -> Result<()> {
        let prior = self.index.get(record.key());
        let overwrite = prior.is_some();

        let event = BeforeSet {
            prior,
            incoming: record,
        };
        self.before_add.publish(&event)?;

        let record = event.incoming;
        self.index.insert(record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);

        tracing::trace!(
            store = %self.config.name,
            key = ?record.key(),
            overwrite,
            "record committed"
        );

        self.after_add.publish(&AfterSet { committed: record })
    }

    /// Check if a key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.index.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in enumeration order.
    pub fn keys(&self) -> Vec<T::Key> {
        self.index.keys()
    }

    /// Copy of every record in enumeration order.
    pub fn records(&self) -> Vec<T> {
        self.index.snapshot()
    }

    // --- Hooks ---

    /// Listen for writes before they land.
    pub fn on_before_add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&BeforeSet<T>) -> Result<()> + Send + Sync + 'static,
    {
        self.before_add.subscribe(listener)
    }

    /// Listen for writes after they land.
    pub fn on_after_add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AfterSet<T>) -> Result<()> + Send + Sync + 'static,
    {
        self.after_add.subscribe(listener)
    }

    /// Receive before-events on a bounded channel.
    pub fn on_before_add_channel(&self, buffer_size: usize) -> (Subscription, Receiver<BeforeSet<T>>)
    where
        T: Send,
    {
        self.before_add.subscribe_channel(buffer_size)
    }

    /// Receive after-events on a bounded channel.
    pub fn on_after_add_channel(&self, buffer_size: usize) -> (Subscription, Receiver<AfterSet<T>>)
    where
        T: Send,
    {
        self.after_add.subscribe_channel(buffer_size)
    }

    // --- Scans ---

    /// Call `visitor(record, index)` for every record, in enumeration order.
    ///
    /// Iterates a snapshot taken on entry: writes made by the visitor are
    /// visible to later `get` calls but do not change what is visited.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&T, usize),
    {
        for (idx, record) in self.index.snapshot().iter().enumerate() {
            visitor(record, idx);
        }
    }

    /// Pick the highest-scoring record using the configured policy.
    ///
    /// Never writes and never fires hooks.
    pub fn select_best<S, F>(&self, score: F) -> Option<T>
    where
        F: FnMut(&T) -> S,
        S: PartialOrd + Default,
    {
        self.select_best_with(self.config.selection, score)
    }

    /// Pick the highest-scoring record using an explicit policy.
    pub fn select_best_with<S, F>(&self, policy: SelectionPolicy, score: F) -> Option<T>
    where
        F: FnMut(&T) -> S,
        S: PartialOrd + Default,
    {
        selection::select_best(self.index.snapshot(), policy, score)
    }

    // --- Store Operations ---

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            record_count: self.index.count() as u64,
            write_count: self.writes.load(Ordering::SeqCst),
            before_listeners: self.before_add.listener_count() as u64,
            after_listeners: self.after_add.listener_count() as u64,
        }
    }

    /// Get the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl<T> Default for RecordStore<T>
where
    T: Keyed + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("name", &self.config.name)
            .field("before_add", &self.before_add)
            .field("after_add", &self.after_add)
            .finish_non_exhaustive()
    }
}
