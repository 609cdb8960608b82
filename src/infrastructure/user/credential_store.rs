//! Credential store backed by the user repository

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::auth::CredentialStore;
use crate::domain::user::{UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

/// Verifies credentials against stored users and their Argon2 hashes
///
/// Every lookup pays for one hash verification, whether or not the username
/// exists, and the password is checked before the account status.
#[derive(Clone)]
pub struct UserCredentialStore {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    dummy_hash: String,
}

impl std::fmt::Debug for UserCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentialStore")
            .field("repository", &self.repository)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl UserCredentialStore {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        // Only compared against on the unknown-user path
        let dummy_hash = hasher.hash(DUMMY_PASSWORD).unwrap_or_default();

        Self {
            repository,
            hasher,
            dummy_hash,
        }
    }
}

#[async_trait]
impl CredentialStore for UserCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<Option<UserId>, DomainError> {
        let Some(user) = self.repository.get_by_username(username).await? else {
            self.hasher.verify(password, &self.dummy_hash);
            debug!(username = %username, "Unknown username");
            return Ok(None);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(username = %username, "Password mismatch");
            return Ok(None);
        }

        if !user.is_active() {
            debug!(username = %username, "User is not active");
            return Ok(None);
        }

        self.repository.record_login(user.id()).await?;

        Ok(Some(user.id().clone()))
    }
}
