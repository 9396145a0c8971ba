use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use sea_orm::ConnectOptions;
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

/// Connection pool settings for PostgreSQL.
///
/// Can be constructed manually or loaded from environment variables.
///
/// # Example
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::PostgresConfig;
///
/// let config = PostgresConfig::from_env()?;
/// let db = database::postgres::connect_from_config(config).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections kept open
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Pool acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Connection max lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,

    /// SQL logging level
    pub sqlx_logging_level: LevelFilter,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Convert into SeaORM `ConnectOptions`.
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 30,
            max_lifetime_secs: 1800,
            sqlx_logging: true,
            sqlx_logging_level: LevelFilter::Info,
        }
    }
}

fn parsed_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        })
}

/// Environment variables:
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (default: 20)
/// - `DB_MIN_CONNECTIONS` (default: 2)
/// - `DB_CONNECT_TIMEOUT_SECS` (default: 8)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (default: 8)
/// - `DB_IDLE_TIMEOUT_SECS` (default: 30)
/// - `DB_MAX_LIFETIME_SECS` (default: 1800)
/// - `DB_SQLX_LOGGING` (default: true)
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            max_connections: parsed_env("DB_MAX_CONNECTIONS", "20")?,
            min_connections: parsed_env("DB_MIN_CONNECTIONS", "2")?,
            connect_timeout_secs: parsed_env("DB_CONNECT_TIMEOUT_SECS", "8")?,
            acquire_timeout_secs: parsed_env("DB_ACQUIRE_TIMEOUT_SECS", "8")?,
            idle_timeout_secs: parsed_env("DB_IDLE_TIMEOUT_SECS", "30")?,
            max_lifetime_secs: parsed_env("DB_MAX_LIFETIME_SECS", "1800")?,
            sqlx_logging: parsed_env("DB_SQLX_LOGGING", "true")?,
            sqlx_logging_level: LevelFilter::Info,
        })
    }
}
