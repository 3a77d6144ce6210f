//! Typed error enum for the storage layer.
//!
//! Lets callers match on specific failure modes (unavailable change feed,
//! transient DB errors) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / connection / timeout failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Row or notification payload could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Change feed could not be opened.
    #[error("change feed unavailable: {0}")]
    Subscription(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying on the next poll).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "JSON serialization/deserialization".to_owned(),
            source: Box::new(err),
        }
    }
}
