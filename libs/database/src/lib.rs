//! Database library providing connectors and utilities for MongoDB and PostgreSQL
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB document store, used by the HTTP API
//! - `postgres` - PostgreSQL via SeaORM, used by the relational bootstrap
//! - `config` - `core_config::FromEnv` implementations for the config types
//! - `all` - everything above
//!
//! # Examples
//!
//! ## MongoDB
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shardDB");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```
//!
//! ## PostgreSQL
//!
//! ```ignore
//! use database::postgres::{PostgresConfig, connect_from_config};
//!
//! let config = PostgresConfig::default();
//! let db = connect_from_config(&config).await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult, RetryConfig};
