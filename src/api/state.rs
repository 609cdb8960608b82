//! Application state shared by all handlers

use std::sync::Arc;

use crate::domain::auth::TokenProvider;
use crate::domain::user::UserRepository;

/// Cloned into every request; nothing in here changes after startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub token_provider: Arc<dyn TokenProvider>,
    /// Probed by the readiness check
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            token_provider,
            user_repository,
        }
    }
}
