//! Record table.
//!
//! Records live in a single keyed table; the index keeps lookups O(1) and
//! preserves first-write order for full scans.

mod index;

pub use index::RecordIndex;
