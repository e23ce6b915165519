//! Shared application state.

use mongodb::{Client, Database};

/// Built once in `main` and handed to every route module.
///
/// Cloning is cheap: the driver handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Kept for readiness pings and dropped on shutdown
    pub mongo_client: Client,
    /// Database selected by `MONGODB_DATABASE`
    pub db: Database,
}

impl AppState {
    pub fn new(config: crate::config::Config, mongo_client: Client) -> Self {
        let db = mongo_client.database(config.mongodb.database());
        Self {
            config,
            mongo_client,
            db,
        }
    }
}
