//! Shared application state

use crate::config::Config;
use crate::jwt::JwtManager;
use crate::repository::{
    OrganizationRepository, OrganizationRepositoryImpl, UserRepository, UserRepositoryImpl,
};
use sqlx::MySqlPool;
use std::sync::Arc;

/// Application state shared across handlers and middleware.
///
/// Repositories are held as trait objects so tests can inject mocks
/// without touching a database.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtManager>,
    pub users: Arc<dyn UserRepository>,
    pub orgs: Arc<dyn OrganizationRepository>,
}

impl AppState {
    pub fn new(config: Config, pool: MySqlPool) -> Self {
        let jwt = Arc::new(JwtManager::new(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            jwt,
            users: Arc::new(UserRepositoryImpl::new(pool.clone())),
            orgs: Arc::new(OrganizationRepositoryImpl::new(pool)),
        }
    }

    /// Build a state around injected repositories (used by tests).
    pub fn with_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        orgs: Arc<dyn OrganizationRepository>,
    ) -> Self {
        let jwt = Arc::new(JwtManager::new(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            jwt,
            users,
            orgs,
        }
    }
}
