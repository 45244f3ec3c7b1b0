//! Error types for the record store.

use crate::subscriptions::ListenerId;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// A listener rejected an event; the rest of that fan-out was skipped.
    #[error("Listener failed: {0}")]
    Listener(String),

    #[error("Subscriber {0} lagged: channel buffer is full")]
    SubscriberLagged(ListenerId),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A record handed to an ingestion sink failed.
    #[error("Ingestion failed at record {index}: {source}")]
    Ingest {
        index: usize,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Shorthand for a listener rejection.
    pub fn listener(msg: impl Into<String>) -> Self {
        StoreError::Listener(msg.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for StoreError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for StoreError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        StoreError::Deserialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
