use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    core_config::load_dotenv()?;
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let state = AppState::new(config, mongo_client);

    info!(
        "Successfully connected to MongoDB database: {}",
        state.config.mongodb.database()
    );

    api::init_indexes(&state).await?;

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state))?;

    info!("Starting Shard API with production-ready shutdown (30s timeout)");

    let server_config = state.config.server.clone();
    create_production_app(router, &server_config, Duration::from_secs(30), async move {
        info!("Shutting down: closing MongoDB connections");
        drop(state);
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shard API shutdown complete");
    Ok(())
}
