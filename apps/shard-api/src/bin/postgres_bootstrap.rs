//! Opens the relational connection pool once and exits.
//!
//! Reads `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` (see
//! `PostgresConfig`), connects with retry and pings the server.

use core_config::{Environment, FromEnv, tracing::{init_tracing, install_color_eyre}};
use database::postgres::{PostgresConfig, check_health, connect_from_config_with_retry};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    core_config::load_dotenv()?;
    init_tracing(&Environment::from_env());

    let config = PostgresConfig::from_env()?;
    info!("Connecting to PostgreSQL at {}", config.display_target());

    let db = connect_from_config_with_retry(&config, None).await?;
    check_health(&db).await?;

    info!("Connected to PostgreSQL");

    db.close().await?;
    Ok(())
}
