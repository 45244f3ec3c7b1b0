//! Core types for the record store.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// A value that carries its own identity key.
///
/// The store never looks past this accessor: everything else about a record
/// is opaque to it. Two records with equal keys are the same logical record,
/// so a later write with the same key replaces the earlier one.
///
/// ```ignore
/// #[derive(Clone)]
/// struct Pokemon { id: String, attack: u32, defense: u32 }
///
/// impl Keyed for Pokemon {
///     type Key = String;
///     fn key(&self) -> &String { &self.id }
/// }
/// ```
pub trait Keyed {
    /// Primary key type.
    type Key: Clone + Eq + Hash + Debug;

    /// The record's identity key. Must not change for the lifetime of the value.
    fn key(&self) -> &Self::Key;
}

/// Serialization format of a bulk record source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordFormat {
    /// A JSON array of records.
    Json,
    /// A MessagePack array of records.
    MessagePack,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat::Json
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Distinct keys currently held.
    pub record_count: u64,
    /// Committed writes, overwrites included.
    pub write_count: u64,
    pub before_listeners: u64,
    pub after_listeners: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format_default() {
        assert_eq!(RecordFormat::default(), RecordFormat::Json);
    }

    #[test]
    fn test_record_format_serde_names() {
        let encoded = serde_json::to_string(&RecordFormat::MessagePack).unwrap();
        assert_eq!(encoded, "\"MessagePack\"");
    }
}
