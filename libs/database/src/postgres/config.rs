use sea_orm::ConnectOptions;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};

/// PostgreSQL connection and pool settings
///
/// # Example
///
/// ```ignore
/// use database::postgres::PostgresConfig;
///
/// let config = PostgresConfig::new("localhost", 5432, "postgres", "password", "postgres");
/// let options = config.into_connect_options();
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Maximum number of open connections
    pub max_connections: u32,

    /// Connections kept idle in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Lifetime of a pooled connection in seconds
    pub max_lifetime_secs: u64,

    /// Log statements through SeaORM
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections;
        self
    }

    /// libpq keyword/value form: `host=.. port=.. user=.. password=.. dbname=.. sslmode=disable`
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode=disable",
            self.host, self.port, self.user, self.password, self.database
        )
    }

    /// URL form accepted by SeaORM, same parameters as [`Self::connection_string`]
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode=disable",
            self.user, self.password, self.host, self.port, self.database
        )
    }

    /// Connection target without credentials, for logging
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }

    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "password".to_string(),
            database: "postgres".to_string(),
            max_connections: 10,
            min_connections: 5,
            connect_timeout_secs: 8,
            max_lifetime_secs: 300,
            sqlx_logging: false,
        }
    }
}

/// Environment variables:
/// - `DB_HOST` (default: localhost)
/// - `DB_PORT` (default: 5432)
/// - `DB_USER` (default: postgres)
/// - `DB_PASSWORD` (default: password)
/// - `DB_NAME` (default: postgres)
/// - `DB_MAX_CONNECTIONS` (default: 10)
/// - `DB_MIN_CONNECTIONS` (default: 5)
/// - `DB_MAX_LIFETIME_SECS` (default: 300)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            host: env_or_default("DB_HOST", &defaults.host),
            port: env_parse_or_default("DB_PORT", defaults.port)?,
            user: env_or_default("DB_USER", &defaults.user),
            password: env_or_default("DB_PASSWORD", &defaults.password),
            database: env_or_default("DB_NAME", &defaults.database),
            max_connections: env_parse_or_default("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: env_parse_or_default("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: defaults.connect_timeout_secs,
            max_lifetime_secs: env_parse_or_default(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime_secs,
            )?,
            sqlx_logging: env_parse_or_default("DB_SQLX_LOGGING", defaults.sqlx_logging)?,
        })
    }
}
