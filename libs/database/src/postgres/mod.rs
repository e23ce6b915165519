//! PostgreSQL connection bootstrap (SeaORM)
//!
//! Nothing in the HTTP API queries PostgreSQL; the `postgres-bootstrap`
//! binary uses this module to open and verify a pool.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
