use sea_orm::{Database, DatabaseConnection};
use tracing::{info, instrument};

use super::PostgresConfig;
use crate::common::{DatabaseError, DatabaseResult, RetryConfig, retry, retry_with_backoff};

/// Open a pool from `config` and verify it with a ping
#[instrument(skip(config), fields(target = %config.display_target()))]
pub async fn connect_from_config(config: &PostgresConfig) -> DatabaseResult<DatabaseConnection> {
    info!("Connecting to PostgreSQL");

    let db = Database::connect(config.clone().into_connect_options()).await?;
    db.ping()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Connected to PostgreSQL");
    Ok(db)
}

/// [`connect_from_config`] with exponential backoff
///
/// # Example
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{PostgresConfig, connect_from_config_with_retry};
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config_with_retry(&config, None).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> DatabaseResult<DatabaseConnection> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect_from_config(config), retry_config).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual PostgreSQL
    async fn test_connect_from_config() {
        let db = connect_from_config(&PostgresConfig::default()).await.unwrap();
        db.ping().await.unwrap();
    }
}
