//! Users API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    handlers::router(UserService::new(repository))
}

/// Unique email and phone indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoUserRepository::new(state.db.clone())
        .init_indexes()
        .await?;
    Ok(())
}
