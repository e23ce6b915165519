//! API routes module
//!
//! Users and products are mounted at the root, next to `/health` and `/ready`.

pub mod health;
pub mod products;
pub mod users;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(products::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app))
}

/// Create the indexes both collections rely on for uniqueness and listing
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    users::init_indexes(state).await?;
    products::init_indexes(state).await?;
    Ok(())
}
