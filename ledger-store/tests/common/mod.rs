//! Shared fixtures for ledger-store integration tests.

#![allow(dead_code)]

use ledger_store::{Entity, LedgerStore, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Minimal project record used to exercise the typed layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
}

impl Note {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

impl Entity for Note {
    const KIND: RecordKind = RecordKind::Project;

    fn key_suffix(&self) -> String {
        self.id.clone()
    }
}

/// Exercise the raw contract against any backend.
pub async fn assert_store_contract(store: &dyn LedgerStore, ns: &str) {
    let key = format!("project:{ns}-a");

    // Missing keys read as absent.
    assert_eq!(store.get(&key).await.unwrap(), None);

    // Upsert then overwrite.
    store.set(&key, json!({"v": 1})).await.unwrap();
    store.set(&key, json!({"v": 2})).await.unwrap();
    assert_eq!(store.get(&key).await.unwrap(), Some(json!({"v": 2})));

    // Create-only write refuses an existing key and leaves it intact.
    let err = store.insert_new(&key, json!({"v": 3})).await.unwrap_err();
    assert!(matches!(err, ledger_store::StoreError::Conflict { .. }));
    assert_eq!(store.get(&key).await.unwrap(), Some(json!({"v": 2})));

    // Prefix scan sees only matching keys.
    store
        .set(&format!("project:{ns}-b"), json!({"v": 4}))
        .await
        .unwrap();
    store
        .set(&format!("testimonial:{ns}-c"), json!({"v": 5}))
        .await
        .unwrap();
    let mut keys: Vec<String> = store
        .scan_by_prefix(&format!("project:{ns}-"))
        .await
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    keys.sort();
    assert_eq!(keys, vec![format!("project:{ns}-a"), format!("project:{ns}-b")]);

    // Delete is idempotent.
    store.delete(&key).await.unwrap();
    store.delete(&key).await.unwrap();
    assert_eq!(store.get(&key).await.unwrap(), None);

    // Counters start at one and climb by one.
    let counter = format!("counter:{ns}");
    assert_eq!(store.increment(&counter).await.unwrap(), 1);
    assert_eq!(store.increment(&counter).await.unwrap(), 2);
    assert_eq!(store.increment(&counter).await.unwrap(), 3);
}
