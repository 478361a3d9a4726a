//! In-process ledger backend.

use crate::error::StoreError;
use crate::services::store::LedgerStore;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Ordered in-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn insert_new(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Err(StoreError::Conflict {
                key: key.to_string(),
            });
        }
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let current = match entries.get(key) {
            Some(value) => {
                serde_json::from_value::<u64>(value.clone()).map_err(|source| StoreError::Codec {
                    key: key.to_string(),
                    source,
                })?
            }
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| StoreError::Codec {
            key: key.to_string(),
            source: serde::de::Error::custom("counter is at u64::MAX"),
        })?;
        entries.insert(key.to_string(), Value::from(next));
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scan_stops_at_prefix_boundary() {
        let store = MemoryStore::new();
        store.set("invoice:a", json!(1)).await.unwrap();
        store.set("invoice:b", json!(2)).await.unwrap();
        store.set("invoicez", json!(3)).await.unwrap();
        store.set("project:a", json!(4)).await.unwrap();

        let keys: Vec<String> = store
            .scan_by_prefix("invoice:")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["invoice:a", "invoice:b"]);
    }

    #[tokio::test]
    async fn increment_rejects_non_counter_values() {
        let store = MemoryStore::new();
        store.set("counter:x", json!("seven")).await.unwrap();

        let err = store.increment("counter:x").await.unwrap_err();
        assert!(matches!(err, StoreError::Codec { .. }));
        assert_eq!(store.get("counter:x").await.unwrap(), Some(json!("seven")));
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("site:content", json!({})).await.unwrap();
        assert_eq!(other.len().await, 1);
    }
}
