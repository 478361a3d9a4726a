//! Shared harness for studio-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ledger_store::{LedgerStore, MemoryStore, StoreError};
use serde_json::{json, Value};
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use studio_service::config::StudioConfig;
use studio_service::{AppState, Application};
use tokio::sync::Barrier;

pub const TEST_ADMIN_API_KEY: &str = "test-admin-key-12345";

/// Running server backed by an in-memory ledger.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: MemoryStore,
    pub state: AppState,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(&[]).await
    }

    /// Spawn with extra configuration variables layered over the test defaults.
    pub async fn spawn_with(vars: &[(&str, &str)]) -> Self {
        let config = test_config(vars);
        let store = MemoryStore::new();

        let app = Application::build_with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let state = app.state();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            store,
            state,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn admin_get(&self, path: &str) -> reqwest::RequestBuilder {
        self.get(path).header("X-Admin-Api-Key", TEST_ADMIN_API_KEY)
    }

    pub fn post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).json(body)
    }

    pub fn admin_post(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.post(path, body)
            .header("X-Admin-Api-Key", TEST_ADMIN_API_KEY)
    }

    pub fn put(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.client.put(self.url(path)).json(body)
    }

    pub fn admin_put(&self, path: &str, body: &Value) -> reqwest::RequestBuilder {
        self.put(path, body)
            .header("X-Admin-Api-Key", TEST_ADMIN_API_KEY)
    }

    pub fn admin_delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("X-Admin-Api-Key", TEST_ADMIN_API_KEY)
    }
}

pub fn test_config(vars: &[(&str, &str)]) -> StudioConfig {
    let mut env: HashMap<String, String> = HashMap::from([
        ("SERVICE_NAME".to_string(), "studio-service-test".to_string()),
        ("ADMIN_API_KEY".to_string(), TEST_ADMIN_API_KEY.to_string()),
        ("STORE_BACKEND".to_string(), "memory".to_string()),
    ]);
    for (key, value) in vars {
        env.insert(key.to_string(), value.to_string());
    }

    let common = Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Random port
    };

    StudioConfig::from_lookup(common, |key| env.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn logo_invoice() -> Value {
    json!({
        "client": {"name": "Acme Ltd", "email": "accounts@acme.test"},
        "lineItems": [{"description": "Logo", "quantity": 2, "unitRate": "500.00"}]
    })
}

/// Store whose prefix scans all wait at a shared barrier, so concurrent
/// callers are guaranteed to observe the same state before writing.
pub struct BarrierStore {
    pub inner: MemoryStore,
    barrier: Arc<Barrier>,
}

impl BarrierStore {
    pub fn new(inner: MemoryStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Arc::new(Barrier::new(parties)),
        }
    }
}

#[async_trait]
impl LedgerStore for BarrierStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn insert_new(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.insert_new(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.inner.delete(key).await
    }

    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let entries = self.inner.scan_by_prefix(prefix).await;
        self.barrier.wait().await;
        entries
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.increment(key).await
    }
}

/// Store whose writes fail while `fail_writes` is set.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_writes: AtomicBool,
}

impl FlakyStore {
    fn check(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(anyhow::anyhow!("disk full")));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check()?;
        self.inner.set(key, value).await
    }

    async fn insert_new(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.check()?;
        self.inner.insert_new(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.delete(key).await
    }

    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        self.inner.scan_by_prefix(prefix).await
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.increment(key).await
    }
}
