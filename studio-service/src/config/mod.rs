use crate::models::RateTable;
use crate::services::{InvoiceSettings, NumberingStrategy, SequenceScope};
use rust_decimal::Decimal;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub store: StoreBackend,
    pub database: Option<DatabaseConfig>,
    /// Unset disables every admin route.
    pub admin_api_key: Option<Secret<String>>,
    pub allowed_origins: Vec<String>,
    pub invoicing: InvoiceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl StudioConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store: StoreBackend = parse_env("STORE_BACKEND", &get("STORE_BACKEND", "memory"))?;

        let database = match lookup("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url: Secret::new(url),
                max_connections: parse_env(
                    "DATABASE_MAX_CONNECTIONS",
                    &get("DATABASE_MAX_CONNECTIONS", "10"),
                )?,
                min_connections: parse_env(
                    "DATABASE_MIN_CONNECTIONS",
                    &get("DATABASE_MIN_CONNECTIONS", "1"),
                )?,
            }),
            None => None,
        };

        let rates = RateTable {
            vat_rate: parse_env::<Decimal>("INVOICE_VAT_RATE", &get("INVOICE_VAT_RATE", "0.125"))?,
            levy_a_rate: parse_env::<Decimal>(
                "INVOICE_LEVY_A_RATE",
                &get("INVOICE_LEVY_A_RATE", "0.025"),
            )?,
            levy_b_rate: parse_env::<Decimal>(
                "INVOICE_LEVY_B_RATE",
                &get("INVOICE_LEVY_B_RATE", "0.025"),
            )?,
            currency_scale: parse_env(
                "INVOICE_CURRENCY_SCALE",
                &get("INVOICE_CURRENCY_SCALE", "2"),
            )?,
        };

        let config = StudioConfig {
            common,
            service_name: get("SERVICE_NAME", "studio-service"),
            log_level: get("LOG_LEVEL", "info"),
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.is_empty()),
            store,
            database,
            admin_api_key: lookup("ADMIN_API_KEY")
                .filter(|v| !v.is_empty())
                .map(Secret::new),
            allowed_origins: get("ALLOWED_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            invoicing: InvoiceSettings {
                prefix: get("INVOICE_PREFIX", "SKY"),
                scope: parse_env::<SequenceScope>(
                    "INVOICE_SEQUENCE_SCOPE",
                    &get("INVOICE_SEQUENCE_SCOPE", "global"),
                )?,
                strategy: parse_env::<NumberingStrategy>(
                    "INVOICE_NUMBERING",
                    &get("INVOICE_NUMBERING", "serialized"),
                )?,
                rates,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.store == StoreBackend::Postgres && self.database.is_none() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "DATABASE_URL is required when STORE_BACKEND=postgres"
            )));
        }

        if let Some(db) = &self.database {
            if db.max_connections == 0 || db.min_connections > db.max_connections {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "DATABASE_MIN_CONNECTIONS must not exceed a non-zero DATABASE_MAX_CONNECTIONS"
                )));
            }
        }

        let prefix = &self.invoicing.prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "INVOICE_PREFIX must be non-empty and alphanumeric, got '{}'",
                prefix
            )));
        }

        self.invoicing
            .rates
            .validate()
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        if self.admin_api_key.is_none() {
            tracing::warn!("ADMIN_API_KEY is not set - admin routes will reject every request");
        }

        Ok(())
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("Invalid {} '{}': {}", key, value, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StudioConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StudioConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_original_invoicing_policy() {
        let config = load(&[]).unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.invoicing, InvoiceSettings::default());
        assert_eq!(config.invoicing.prefix, "SKY");
        assert!(config.admin_api_key.is_none());
        assert_eq!(config.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn reads_invoicing_overrides() {
        let config = load(&[
            ("INVOICE_PREFIX", "INV"),
            ("INVOICE_SEQUENCE_SCOPE", "yearly"),
            ("INVOICE_NUMBERING", "counter"),
            ("INVOICE_VAT_RATE", "0.15"),
            ("ADMIN_API_KEY", "s3cret"),
        ])
        .unwrap();

        assert_eq!(config.invoicing.prefix, "INV");
        assert_eq!(config.invoicing.scope, SequenceScope::Yearly);
        assert_eq!(config.invoicing.strategy, NumberingStrategy::Counter);
        assert_eq!(config.invoicing.rates.vat_rate, Decimal::new(15, 2));
        assert_eq!(
            config.admin_api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("s3cret")
        );
    }

    #[test]
    fn postgres_requires_database_url() {
        assert!(load(&[("STORE_BACKEND", "postgres")]).is_err());

        let config = load(&[
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/studio"),
        ])
        .unwrap();
        let database = config.database.unwrap();
        assert_eq!(database.max_connections, 10);
        assert_eq!(database.min_connections, 1);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(load(&[("INVOICE_VAT_RATE", "1.5")]).is_err());
        assert!(load(&[("INVOICE_VAT_RATE", "abc")]).is_err());
        assert!(load(&[("INVOICE_SEQUENCE_SCOPE", "monthly")]).is_err());
        assert!(load(&[("INVOICE_PREFIX", "SKY 1")]).is_err());
        assert!(load(&[("STORE_BACKEND", "mongo")]).is_err());
    }
}
