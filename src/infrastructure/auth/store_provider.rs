//! Default token provider: credential store + token store

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::auth::{CredentialStore, TokenProvider};
use crate::domain::token::{Token, TokenRepository};
use crate::domain::DomainError;

/// Hands out the token already provisioned for a verified user
///
/// The token store is only consulted after the credential store accepted the
/// pair; the two lookups run one after the other. Store errors propagate.
#[derive(Debug, Clone)]
pub struct StoreTokenProvider {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<dyn TokenRepository>,
}

impl StoreTokenProvider {
    pub fn new(credentials: Arc<dyn CredentialStore>, tokens: Arc<dyn TokenRepository>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }
}

#[async_trait]
impl TokenProvider for StoreTokenProvider {
    async fn get_token(&self, username: &str, password: &str) -> Result<Option<Token>, DomainError> {
        let Some(user_id) = self.credentials.verify(username, password).await? else {
            return Ok(None);
        };

        let token = self.tokens.find_token_for_user(&user_id).await?;

        if token.is_none() {
            debug!(user_id = %user_id, "No token provisioned for user");
        }

        Ok(token)
    }

    fn provider_name(&self) -> &'static str {
        "store"
    }
}
