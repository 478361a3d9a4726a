//! PostgreSQL ledger backend.

use crate::error::StoreError;
use crate::services::store::LedgerStore;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use std::time::Duration;
use tracing::{info, instrument};

/// Connection pool over the `kv_store` table.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new database connection pool.
    #[instrument(skip(database_url))]
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `kv_store` table if needed.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running ledger migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Ledger migrations completed");
        Ok(())
    }

    /// The [`StoreError::Codec`] for a counter key whose value cannot be
    /// advanced, matching what the memory backend reports.
    async fn counter_codec_error(&self, key: &str) -> Result<StoreError, StoreError> {
        let current = self.get(key).await?.unwrap_or(Value::Null);
        let source = match serde_json::from_value::<u64>(current.clone()) {
            Err(source) => source,
            Ok(_) => serde::de::Error::custom(format!("counter {} is out of range", current)),
        };
        Ok(StoreError::Codec {
            key: key.to_string(),
            source,
        })
    }
}

/// Value too large for `bigint` (SQLSTATE 22003).
fn is_out_of_range(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "22003")
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value =
            sqlx::query_scalar::<_, Json<Value>>("SELECT value FROM kv_store WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value.map(|Json(v)| v))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_utc = now()
            "#,
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_new(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict {
                key: key.to_string(),
            });
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn scan_by_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Json<Value>)>(
            r#"
            SELECT key, value
            FROM kv_store
            WHERE starts_with(key, $1)
            ORDER BY key
            "#,
        )
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(key, Json(value))| (key, value)).collect())
    }

    async fn increment(&self, key: &str) -> Result<u64, StoreError> {
        // Only whole non-negative counters advance; anything else is left
        // untouched and reported as a codec error.
        let next = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO kv_store (key, value)
            VALUES ($1, '1'::jsonb)
            ON CONFLICT (key) DO UPDATE
            SET value = to_jsonb((kv_store.value #>> '{}')::bigint + 1), updated_utc = now()
            WHERE jsonb_typeof(kv_store.value) = 'number'
              AND (kv_store.value #>> '{}') ~ '^[0-9]+$'
            RETURNING (value #>> '{}')::bigint
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;

        match next {
            Ok(Some(next)) => match u64::try_from(next) {
                Ok(next) => Ok(next),
                Err(_) => Err(self.counter_codec_error(key).await?),
            },
            Ok(None) => Err(self.counter_codec_error(key).await?),
            Err(e) if is_out_of_range(&e) => Err(self.counter_codec_error(key).await?),
            Err(e) => Err(e.into()),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
