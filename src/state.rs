use crate::{config::AppConfig, database::Database, services::auth_service::TokenManager};

/// Shared handles built once at startup and cloned into each worker.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenManager,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(config: &AppConfig, db: Database) -> Self {
        Self {
            db,
            tokens: TokenManager::from_config(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
