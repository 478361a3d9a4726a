//! Raw key/value contract every backend implements.

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Flat, prefix-scannable key/value persistence.
///
/// Values are replaced whole: a backend never patches a stored value, so
/// callers merge before writing. No secondary indexes are kept; prefix scans
/// cost a pass over the key space.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Value at `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Unconditional upsert.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Create-only write. Fails with [`StoreError::Conflict`] if `key` exists.
    async fn insert_new(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Every entry whose key starts with `prefix`. Order is not part of the contract.
    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError>;

    /// Atomically add one to the counter at `key` and return the new value.
    /// A missing counter counts as zero.
    async fn increment(&self, key: &str) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
