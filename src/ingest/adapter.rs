//! Ingestion adapter contract.

use crate::error::Result;
use crate::store::RecordStore;
use crate::types::Keyed;

/// Something that accepts records one at a time.
///
/// Bulk sources depend on this trait only, never on a concrete store, so a
/// loader can feed any target that implements it. Errors from the target
/// are returned unchanged.
pub trait RecordSink<T> {
    /// Commit one record to the target.
    fn add_record(&self, record: T) -> Result<()>;
}

impl<T, F> RecordSink<T> for F
where
    F: Fn(T) -> Result<()>,
{
    fn add_record(&self, record: T) -> Result<()> {
        self(record)
    }
}

/// Routes records into a [`RecordStore`] through its `set` operation.
pub struct StoreAdapter<'a, T: Keyed> {
    store: &'a RecordStore<T>,
}

impl<'a, T: Keyed> StoreAdapter<'a, T> {
    pub fn new(store: &'a RecordStore<T>) -> Self {
        Self { store }
    }

    /// The store records are written to.
    pub fn store(&self) -> &'a RecordStore<T> {
        self.store
    }
}

impl<'a, T> RecordSink<T> for StoreAdapter<'a, T>
where
    T: Keyed + Clone + 'static,
{
    fn add_record(&self, record: T) -> Result<()> {
        self.store.set(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::subscriptions::AfterSet;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        key: u32,
        label: &'static str,
    }

    impl Keyed for Row {
        type Key = u32;

        fn key(&self) -> &u32 {
            &self.key
        }
    }

    fn feed<S: RecordSink<Row>>(sink: &S, rows: Vec<Row>) -> Result<()> {
        for row in rows {
            sink.add_record(row)?;
        }
        Ok(())
    }

    #[test]
    fn test_adapter_writes_through_set() {
        let store = RecordStore::new();
        let committed = Arc::new(Mutex::new(Vec::new()));
        {
            let committed = Arc::clone(&committed);
            store.on_after_add(move |event: &AfterSet<Row>| {
                committed.lock().push(event.committed.key);
                Ok(())
            });
        }

        let adapter = StoreAdapter::new(&store);
        feed(
            &adapter,
            vec![
                Row { key: 2, label: "two" },
                Row { key: 1, label: "one" },
            ],
        )
        .unwrap();

        assert_eq!(*committed.lock(), vec![2, 1]);
        assert_eq!(adapter.store().get(&1).unwrap().label, "one");
    }

    #[test]
    fn test_adapter_propagates_store_failure() {
        let store = RecordStore::new();
        store.on_before_add(|_: &crate::subscriptions::BeforeSet<Row>| {
            Err(StoreError::listener("read-only"))
        });

        let adapter = StoreAdapter::new(&store);
        let result = adapter.add_record(Row { key: 1, label: "one" });

        assert!(matches!(result, Err(StoreError::Listener(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |row: Row| -> Result<()> {
            seen.lock().push(row.label);
            Ok(())
        };

        feed(&sink, vec![Row { key: 9, label: "nine" }]).unwrap();
        assert_eq!(*seen.lock(), vec!["nine"]);
    }
}
