//! Runtime configuration from environment variables
//!
//! `.env` is loaded by `main` before this runs. Every value except the
//! store credentials has a default.

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::services::breakeven::{BreakevenConfig, DEFAULT_EXTENSION_YEARS, DEFAULT_HORIZON_YEARS};

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_DATA_STORE: &str = "DATA_STORE";
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_API_KEY: &str = "SUPABASE_API_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_RUN_MIGRATIONS: &str = "RUN_MIGRATIONS";
pub const ENV_SNAPSHOT_CACHE_TTL: &str = "SNAPSHOT_CACHE_TTL_SECS";
pub const ENV_INCOME_CATEGORY: &str = "INCOME_CATEGORY";
pub const ENV_CURRENCY_SYMBOL: &str = "CURRENCY_SYMBOL";
pub const ENV_BREAKEVEN_HORIZON: &str = "BREAKEVEN_HORIZON_YEARS";
pub const ENV_BREAKEVEN_EXTENSION: &str = "BREAKEVEN_EXTENSION_YEARS";
pub const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECS";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SNAPSHOT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_INCOME_CATEGORY: &str = "Rental Income";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Where portfolio rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted PostgREST endpoint
    Rest { base_url: String, api_key: String },
    /// Direct Postgres connection through SeaORM
    Postgres { database_url: String, run_migrations: bool },
}

/// Settings the request handlers need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Ledger category counted as income; everything else is expense
    pub income_category: String,
    pub currency_symbol: String,
    pub breakeven: BreakevenConfig,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            income_category: DEFAULT_INCOME_CATEGORY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            breakeven: BreakevenConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub backend: StoreBackend,
    pub snapshot_cache_ttl: Duration,
    pub http_timeout: Duration,
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any name -> value lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let backend = match get(ENV_DATA_STORE).as_deref().map(str::to_lowercase).as_deref() {
            None | Some("rest") | Some("supabase") => StoreBackend::Rest {
                base_url: require(ENV_SUPABASE_URL)?,
                api_key: require(ENV_SUPABASE_API_KEY)?,
            },
            Some("postgres") | Some("database") => StoreBackend::Postgres {
                database_url: require(ENV_DATABASE_URL)?,
                run_migrations: parse_flag(ENV_RUN_MIGRATIONS, get(ENV_RUN_MIGRATIONS))?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: ENV_DATA_STORE,
                    value: other.to_string(),
                })
            }
        };

        let snapshot_ttl_secs = parse_or(
            ENV_SNAPSHOT_CACHE_TTL,
            get(ENV_SNAPSHOT_CACHE_TTL),
            DEFAULT_SNAPSHOT_CACHE_TTL_SECS,
        )?;
        let http_timeout_secs =
            parse_or(ENV_HTTP_TIMEOUT, get(ENV_HTTP_TIMEOUT), DEFAULT_HTTP_TIMEOUT_SECS)?;

        let breakeven = BreakevenConfig {
            horizon_years: parse_or(ENV_BREAKEVEN_HORIZON, get(ENV_BREAKEVEN_HORIZON), DEFAULT_HORIZON_YEARS)?,
            extension_years: parse_or(
                ENV_BREAKEVEN_EXTENSION,
                get(ENV_BREAKEVEN_EXTENSION),
                DEFAULT_EXTENSION_YEARS,
            )?,
        };
        if breakeven.horizon_years == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_BREAKEVEN_HORIZON,
                value: "0".to_string(),
            });
        }

        Ok(Self {
            bind_addr: get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            backend,
            snapshot_cache_ttl: Duration::from_secs(snapshot_ttl_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
            dashboard: DashboardSettings {
                income_category: get(ENV_INCOME_CATEGORY)
                    .unwrap_or_else(|| DEFAULT_INCOME_CATEGORY.to_string()),
                currency_symbol: get(ENV_CURRENCY_SYMBOL)
                    .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
                breakeven,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_flag(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let normalized = raw.as_deref().map(str::to_lowercase);
    match normalized.as_deref() {
        None => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some("false") | Some("0") | Some("no") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            name,
            value: raw.unwrap_or_default(),
        }),
    }
}
