//! Lifecycle notifications for store mutations.
//!
//! Each store owns two [`Notifier`]s: one fired before a write lands, one
//! after. A notifier keeps its listeners in subscription order and fans an
//! event out to all of them synchronously.
//!
//! # Example
//!
//! ```ignore
//! let notifier: Notifier<AfterSet<Pokemon>> = Notifier::new();
//!
//! let handle = notifier.subscribe(|event| {
//!     println!("committed {:?}", event.committed);
//!     Ok(())
//! });
//!
//! notifier.publish(&event)?;
//! handle.unsubscribe();
//! ```

mod manager;
mod types;

pub use manager::{Listener, Notifier};
pub use types::{AfterSet, BeforeSet, ListenerId, Subscription};
