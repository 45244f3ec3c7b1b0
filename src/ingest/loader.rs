//! Bulk loader feeding decoded records into a sink.

use crate::error::{Result, StoreError};
use crate::types::RecordFormat;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::adapter::RecordSink;

/// What to do when the sink rejects a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failure. Earlier records stay committed.
    Abort,
    /// Record the failure and continue with the next record.
    Skip,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}

/// Loader configuration.
#[derive(Clone, Debug, Default)]
pub struct LoaderConfig {
    /// Encoding of the record source.
    pub format: RecordFormat,

    pub on_error: ErrorPolicy,
}

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records the sink accepted.
    pub loaded: usize,
    /// Position and error of every rejected record (`Skip` policy only).
    pub skipped: Vec<(usize, StoreError)>,
}

impl LoadReport {
    /// Total records offered to the sink.
    pub fn attempted(&self) -> usize {
        self.loaded + self.skipped.len()
    }
}

/// Reads a sequence of records and hands each to a [`RecordSink`], in
/// source order, with no retry and no rollback.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Feed already-decoded records into `sink`.
    ///
    /// Under [`ErrorPolicy::Abort`] the first failure is returned as
    /// [`StoreError::Ingest`] carrying the record's position.
    pub fn load_iter<T, I, S>(&self, records: I, sink: &S) -> Result<LoadReport>
    where
        I: IntoIterator<Item = T>,
        S: RecordSink<T> + ?Sized,
    {
        let mut report = LoadReport::default();

        for (index, record) in records.into_iter().enumerate() {
            match sink.add_record(record) {
                Ok(()) => report.loaded += 1,
                Err(e) => match self.config.on_error {
                    ErrorPolicy::Abort => {
                        tracing::warn!(index, error = %e, loaded = report.loaded, "load aborted");
                        return Err(StoreError::Ingest {
                            index,
                            source: Box::new(e),
                        });
                    }
                    ErrorPolicy::Skip => {
                        tracing::warn!(index, error = %e, "skipping rejected record");
                        report.skipped.push((index, e));
                    }
                },
            }
        }

        tracing::debug!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "load finished"
        );
        Ok(report)
    }

    /// Decode an array of records from `reader` and feed them into `sink`.
    ///
    /// The whole source is decoded before any record is applied, so a
    /// malformed source leaves the sink untouched.
    pub fn load_reader<T, R, S>(&self, reader: R, sink: &S) -> Result<LoadReport>
    where
        T: DeserializeOwned,
        R: Read,
        S: RecordSink<T> + ?Sized,
    {
        let records: Vec<T> = self.decode(reader)?;
        tracing::debug!(count = records.len(), format = ?self.config.format, "decoded records");
        self.load_iter(records, sink)
    }

    /// Open `path` and load it with [`load_reader`](Self::load_reader).
    pub fn load_file<T, S>(&self, path: impl AsRef<Path>, sink: &S) -> Result<LoadReport>
    where
        T: DeserializeOwned,
        S: RecordSink<T> + ?Sized,
    {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading records from file");

        let file = File::open(path)?;
        self.load_reader(BufReader::new(file), sink)
    }

    fn decode<T, R>(&self, reader: R) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        R: Read,
    {
        match self.config.format {
            RecordFormat::Json => serde_json::from_reader(reader)
                .map_err(|e| StoreError::Deserialization(e.to_string())),
            RecordFormat::MessagePack => Ok(rmp_serde::from_read(reader)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::StoreAdapter;
    use crate::store::RecordStore;
    use crate::subscriptions::BeforeSet;
    use crate::types::Keyed;
    use serde::{Deserialize, Serialize};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        value: i32,
    }

    impl Keyed for Sample {
        type Key = String;

        fn key(&self) -> &String {
            &self.id
        }
    }

    fn sample(id: &str, value: i32) -> Sample {
        Sample {
            id: id.to_string(),
            value,
        }
    }

    fn reject_negative(store: &RecordStore<Sample>) {
        store.on_before_add(|event: &BeforeSet<Sample>| {
            if event.incoming.value < 0 {
                return Err(StoreError::listener(format!("{} is negative", event.incoming.id)));
            }
            Ok(())
        });
    }

    #[test]
    fn test_load_json_reader() {
        let store: RecordStore<Sample> = RecordStore::new();
        let data = br#"[{"id": "a", "value": 1}, {"id": "b", "value": 2}]"#;

        let report = Loader::default()
            .load_reader(&data[..], &StoreAdapter::new(&store))
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(store.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        let records = vec![sample("x", 10), sample("y", 20), sample("x", 30)];
        file.write_all(&serde_json::to_vec(&records).unwrap()).unwrap();

        let store: RecordStore<Sample> = RecordStore::new();
        let report = Loader::default()
            .load_file(file.path(), &StoreAdapter::new(&store))
            .unwrap();

        assert_eq!(report.loaded, 3);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("x"), Some(sample("x", 30)));
    }

    #[test]
    fn test_load_messagepack() {
        let records = vec![sample("a", 1), sample("b", 2)];
        let encoded = rmp_serde::to_vec(&records).unwrap();

        let store: RecordStore<Sample> = RecordStore::new();
        let loader = Loader::new(LoaderConfig {
            format: RecordFormat::MessagePack,
            ..Default::default()
        });
        let report = loader
            .load_reader(&encoded[..], &StoreAdapter::new(&store))
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(store.records(), records);
    }

    #[test]
    fn test_abort_leaves_partial_state() {
        let store = RecordStore::new();
        reject_negative(&store);

        let records = vec![sample("a", 1), sample("b", -1), sample("c", 3)];
        let result = Loader::default().load_iter(records, &StoreAdapter::new(&store));

        match result {
            Err(StoreError::Ingest { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, StoreError::Listener(_)));
            }
            other => panic!("Expected Ingest error, got {:?}", other),
        }
        assert_eq!(store.keys(), vec!["a"]);
    }

    #[test]
    fn test_skip_continues() {
        let store = RecordStore::new();
        reject_negative(&store);

        let loader = Loader::new(LoaderConfig {
            on_error: ErrorPolicy::Skip,
            ..Default::default()
        });
        let records = vec![sample("a", 1), sample("b", -1), sample("c", 3)];
        let report = loader
            .load_iter(records, &StoreAdapter::new(&store))
            .unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.attempted(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 1);
        assert_eq!(store.keys(), vec!["a", "c"]);
    }

    #[test]
    fn test_malformed_source_applies_nothing() {
        let store: RecordStore<Sample> = RecordStore::new();
        let data = br#"[{"id": "a", "value": 1}, {"id": "b""#;

        let result = Loader::default().load_reader(&data[..], &StoreAdapter::new(&store));

        assert!(matches!(result, Err(StoreError::Deserialization(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let store: RecordStore<Sample> = RecordStore::new();
        let result = Loader::default()
            .load_file("/nonexistent/records.json", &StoreAdapter::new(&store));

        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
