//! Bulk ingestion.
//!
//! A [`Loader`] knows how to read records and nothing about where they go;
//! it hands each one to a [`RecordSink`]. [`StoreAdapter`] is the sink that
//! writes into a [`RecordStore`](crate::RecordStore), so swapping the target
//! never touches the loader.
//!
//! # Example
//!
//! ```ignore
//! let store = RecordStore::<Pokemon>::new();
//! let report = Loader::default().load_file("data.json", &StoreAdapter::new(&store))?;
//! println!("loaded {} records", report.loaded);
//! ```

mod adapter;
mod loader;

pub use adapter::{RecordSink, StoreAdapter};
pub use loader::{ErrorPolicy, LoadReport, Loader, LoaderConfig};
