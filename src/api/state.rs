//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, PostRepo, PostStore, UserRepo, UserStore};
use crate::services::{AuthService, Authenticator, JwtTokens, PostManager, PostService, TokenService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Post service
    pub post_service: Arc<dyn PostService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    ///
    /// Wires the SeaORM repositories into the concrete services.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let users: Arc<dyn UserRepo> = Arc::new(UserStore::new(database.get_connection()));
        let posts: Arc<dyn PostRepo> = Arc::new(PostStore::new(database.get_connection()));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokens::new(config));

        Self {
            auth_service: Arc::new(Authenticator::new(users, tokens)),
            post_service: Arc::new(PostManager::new(posts)),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        post_service: Arc<dyn PostService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            post_service,
            database,
        }
    }
}
