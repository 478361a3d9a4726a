//! Error kinds surfaced by ledger backends.

use crate::models::RecordKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying medium could not be reached or written. Nothing was committed.
    #[error("Storage unavailable: {0}")]
    Unavailable(anyhow::Error),

    /// A create-only write found the key already populated.
    #[error("Key '{key}' already exists")]
    Conflict { key: String },

    #[error("Failed to decode value at '{key}': {source}")]
    Codec {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Key '{key}' does not belong to {expected} records")]
    KindMismatch { key: String, expected: RecordKind },
}

impl StoreError {
    /// Whether retrying the same operation may succeed.
    ///
    /// Only availability failures qualify; conflicts and decode failures are
    /// deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Unavailable(_) => "unavailable",
            StoreError::Conflict { .. } => "conflict",
            StoreError::Codec { .. } => "codec",
            StoreError::KindMismatch { .. } => "kind_mismatch",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(anyhow::Error::new(err))
    }
}
