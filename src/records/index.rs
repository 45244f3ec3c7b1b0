//! Key index over the current record set.

use crate::types::Keyed;
use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Slots in first-write order plus a key -> slot lookup.
struct Table<T: Keyed> {
    positions: HashMap<T::Key, usize>,
    slots: Vec<T>,
}

/// Index mapping identity keys to their current record.
///
/// Enumeration order is the order in which each key was first written.
/// Overwriting a key replaces the record in place and keeps its position.
pub struct RecordIndex<T: Keyed> {
    table: RwLock<Table<T>>,
}

impl<T: Keyed + Clone> RecordIndex<T> {
    /// Create a new index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(Table {
                positions: HashMap::with_capacity(capacity),
                slots: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Get the record stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let table = self.table.read();
        table
            .positions
            .get(key)
            .map(|&pos| table.slots[pos].clone())
    }

    /// Check whether a key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.read().positions.contains_key(key)
    }

    /// Insert or overwrite a record. Returns true if the key already existed.
    pub fn insert(&self, record: T) -> bool {
        let mut table = self.table.write();
        if let Some(&pos) = table.positions.get(record.key()) {
            table.slots[pos] = record;
            return true;
        }

        let pos = table.slots.len();
        table.positions.insert(record.key().clone(), pos);
        table.slots.push(record);
        false
    }

    /// Get count of records.
    pub fn count(&self) -> usize {
        self.table.read().slots.len()
    }

    /// Copy of every record, in enumeration order.
    pub fn snapshot(&self) -> Vec<T> {
        self.table.read().slots.clone()
    }

    /// Copy of every key, in enumeration order.
    pub fn keys(&self) -> Vec<T::Key> {
        self.table
            .read()
            .slots
            .iter()
            .map(|record| record.key().clone())
            .collect()
    }
}

impl<T: Keyed + Clone> Default for RecordIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
