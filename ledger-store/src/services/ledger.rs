//! Typed access layer over a [`LedgerStore`].

use crate::error::StoreError;
use crate::models::{Entity, RecordKind};
use crate::services::metrics::{STORE_ERRORS_TOTAL, STORE_OPERATION_DURATION};
use crate::services::store::LedgerStore;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Shared handle to a backend that only speaks in [`Entity`] types.
///
/// Keys are always derived from the entity's [`RecordKind`], and listings
/// decode only the prefix that belongs to the requested type.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Underlying raw store.
    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    #[instrument(skip(self), fields(kind = %E::KIND))]
    pub async fn fetch<E: Entity>(&self, suffix: &str) -> Result<Option<E>, StoreError> {
        let key = E::KIND.key(suffix);
        let value = timed("get", self.store.get(&key)).await?;
        value.map(|v| decode(&key, v)).transpose()
    }

    /// Fetch by full key, refusing keys outside `E`'s prefix.
    pub async fn fetch_key<E: Entity>(&self, key: &str) -> Result<Option<E>, StoreError> {
        match key.strip_prefix(E::KIND.prefix()) {
            Some(suffix) => self.fetch(suffix).await,
            None => Err(StoreError::KindMismatch {
                key: key.to_string(),
                expected: E::KIND,
            }),
        }
    }

    /// Upsert the full value of `entity`.
    #[instrument(skip(self, entity), fields(kind = %E::KIND))]
    pub async fn put<E: Entity>(&self, entity: &E) -> Result<(), StoreError> {
        let key = entity.key();
        let value = encode(&key, entity)?;
        timed("set", self.store.set(&key, value)).await?;
        debug!(key = %key, "Record stored");
        Ok(())
    }

    /// Create-only write; [`StoreError::Conflict`] when the key is taken.
    #[instrument(skip(self, entity), fields(kind = %E::KIND))]
    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<(), StoreError> {
        let key = entity.key();
        let value = encode(&key, entity)?;
        timed("insert_new", self.store.insert_new(&key, value)).await?;
        debug!(key = %key, "Record created");
        Ok(())
    }

    #[instrument(skip(self), fields(kind = %E::KIND))]
    pub async fn remove<E: Entity>(&self, suffix: &str) -> Result<(), StoreError> {
        let key = E::KIND.key(suffix);
        timed("delete", self.store.delete(&key)).await
    }

    /// Every record of type `E`, in key order.
    pub async fn list<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        self.list_under("").await
    }

    /// Records of type `E` whose key suffix starts with `sub_prefix`, in key order.
    #[instrument(skip(self), fields(kind = %E::KIND))]
    pub async fn list_under<E: Entity>(&self, sub_prefix: &str) -> Result<Vec<E>, StoreError> {
        let mut entries = self.scan(E::KIND, sub_prefix).await?;
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
            .into_iter()
            .map(|(key, value)| decode(&key, value))
            .collect()
    }

    /// Number of `kind` records under `sub_prefix`, without decoding them.
    pub async fn count_under(
        &self,
        kind: RecordKind,
        sub_prefix: &str,
    ) -> Result<usize, StoreError> {
        Ok(self.scan(kind, sub_prefix).await?.len())
    }

    /// Key suffixes of `kind` records under `sub_prefix`, in key order,
    /// without decoding the values.
    pub async fn suffixes_under(
        &self,
        kind: RecordKind,
        sub_prefix: &str,
    ) -> Result<Vec<String>, StoreError> {
        let mut suffixes: Vec<String> = self
            .scan(kind, sub_prefix)
            .await?
            .into_iter()
            .filter_map(|(key, _)| key.strip_prefix(kind.prefix()).map(str::to_string))
            .collect();
        suffixes.sort();
        Ok(suffixes)
    }

    /// Atomically advance the named counter and return its new value.
    #[instrument(skip(self))]
    pub async fn next_in_sequence(&self, name: &str) -> Result<u64, StoreError> {
        let key = RecordKind::Counter.key(name);
        timed("increment", self.store.increment(&key)).await
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        timed("health_check", self.store.health_check()).await
    }

    async fn scan(
        &self,
        kind: RecordKind,
        sub_prefix: &str,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let prefix = kind.key(sub_prefix);
        timed("scan_by_prefix", self.store.scan_by_prefix(&prefix)).await
    }
}

fn encode<E: Entity>(key: &str, entity: &E) -> Result<Value, StoreError> {
    serde_json::to_value(entity).map_err(|source| StoreError::Codec {
        key: key.to_string(),
        source,
    })
}

fn decode<E: Entity>(key: &str, value: Value) -> Result<E, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Codec {
        key: key.to_string(),
        source,
    })
}

async fn timed<T, F>(operation: &'static str, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    let timer = STORE_OPERATION_DURATION
        .with_label_values(&[operation])
        .start_timer();
    let result = fut.await;
    timer.observe_duration();

    if let Err(e) = &result {
        STORE_ERRORS_TOTAL
            .with_label_values(&[operation, e.kind()])
            .inc();
    }

    result
}
