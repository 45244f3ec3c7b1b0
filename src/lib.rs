//! # Hookstore
//!
//! An in-process keyed record store with three extension points layered
//! around a small core.
//!
//! ## Core Concepts
//!
//! - **Records**: any value implementing [`Keyed`]; a later `set` with the
//!   same key replaces the earlier one
//! - **Hooks**: ordered before/after notifications around every write
//! - **Selection**: pick the highest-scoring record with a caller-supplied score
//! - **Ingestion**: bulk loaders feed records through a [`RecordSink`]
//!
//! ## Example
//!
//! ```ignore
//! use hookstore::{Keyed, Loader, RecordStore, StoreAdapter};
//!
//! let store = RecordStore::<Pokemon>::new();
//!
//! let handle = store.on_after_add(|event| {
//!     println!("stored {}", event.committed.id);
//!     Ok(())
//! });
//!
//! Loader::default().load_file("data.json", &StoreAdapter::new(&store))?;
//! handle.unsubscribe();
//!
//! let tank = store.select_best(|p| p.defense);
//! ```

pub mod error;
pub mod ingest;
pub mod records;
pub mod selection;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use ingest::{ErrorPolicy, LoadReport, Loader, LoaderConfig, RecordSink, StoreAdapter};
pub use records::RecordIndex;
pub use selection::{select_best, SelectionPolicy};
pub use store::{RecordStore, StoreConfig};
pub use subscriptions::{AfterSet, BeforeSet, Listener, ListenerId, Notifier, Subscription};
pub use types::*;
