//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://data/stockpile.db` |
//! | `STORAGE_BACKEND` | `sqlite` (or `memory`) |
//! | `BIND_ADDRESS` | `0.0.0.0:8080` |
//! | `DB_MAX_CONNECTIONS` | `25` |
//! | `DB_MIN_CONNECTIONS` | `5` |
//! | `DB_MAX_LIFETIME_SECS` | `300` |
//! | `REQUEST_TIMEOUT_SECS` | `10` |
//! | `SHUTDOWN_TIMEOUT_SECS` | `10` |
//! | `SEED_SAMPLE_DATA` | `true` |
//! | `LOG_FORMAT` | `text` (or `json`) |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use stockpile_core::{Result, StockpileError};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/stockpile.db";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Which store backs the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = StockpileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "sqlite" | "sql" | "db" => Ok(StorageBackend::Sqlite),
            other => Err(StockpileError::Config(format!(
                "STORAGE_BACKEND: unknown backend '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = StockpileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(StockpileError::Config(format!(
                "LOG_FORMAT: unknown format '{}'",
                other
            ))),
        }
    }
}

/// Connection pool settings for the SQLite store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 25,
            min_connections: 5,
            max_lifetime: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub backend: StorageBackend,
    pub database: DatabaseConfig,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
    pub seed_sample_data: bool,
    pub log_format: LogFormat,
    /// `.env` file read by `load`, if any.
    pub env_file: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    ///
    /// Runs before logging is set up, so nothing is logged here; the caller
    /// reports `env_file` once a subscriber exists.
    pub fn load() -> Result<Self> {
        let env_file = dotenv::dotenv().ok();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.env_file = env_file;
        Ok(config)
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_address = parse_or(&var, "BIND_ADDRESS", || {
            DEFAULT_BIND_ADDRESS
                .parse::<SocketAddr>()
                .map_err(|e| StockpileError::Config(format!("BIND_ADDRESS: {}", e)))
        })?;
        let backend = parse_or(&var, "STORAGE_BACKEND", || Ok(StorageBackend::Sqlite))?;

        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", || Ok(defaults.max_connections))?,
            min_connections: parse_or(&var, "DB_MIN_CONNECTIONS", || Ok(defaults.min_connections))?,
            max_lifetime: Duration::from_secs(parse_or(&var, "DB_MAX_LIFETIME_SECS", || {
                Ok(defaults.max_lifetime.as_secs())
            })?),
        };
        if database.max_connections == 0 {
            return Err(StockpileError::Config(
                "DB_MAX_CONNECTIONS: must be at least 1".to_string(),
            ));
        }
        if database.min_connections > database.max_connections {
            return Err(StockpileError::Config(format!(
                "DB_MIN_CONNECTIONS: {} exceeds DB_MAX_CONNECTIONS {}",
                database.min_connections, database.max_connections
            )));
        }

        let request_timeout =
            Duration::from_secs(parse_or(&var, "REQUEST_TIMEOUT_SECS", || Ok(10u64))?);
        let shutdown_timeout =
            Duration::from_secs(parse_or(&var, "SHUTDOWN_TIMEOUT_SECS", || Ok(10u64))?);

        let seed_sample_data = match var("SEED_SAMPLE_DATA") {
            Some(v) => parse_bool("SEED_SAMPLE_DATA", &v)?,
            None => true,
        };
        let log_format = parse_or(&var, "LOG_FORMAT", || Ok(LogFormat::Text))?;

        Ok(Config {
            bind_address,
            backend,
            database,
            request_timeout,
            shutdown_timeout,
            seed_sample_data,
            log_format,
            env_file: None,
        })
    }
}

fn parse_or<T, V, D>(var: &V, key: &str, default: D) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    V: Fn(&str) -> Option<String>,
    D: FnOnce() -> Result<T>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| StockpileError::Config(format!("{}: invalid value '{}': {}", key, raw, e))),
        None => default(),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(StockpileError::Config(format!(
            "{}: expected a boolean, got '{}'",
            key, raw
        ))),
    }
}
