//! In-memory token store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::token::{AuthToken, Token, TokenRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of [`TokenRepository`]
///
/// Tokens are kept per user in provisioning order, so the earliest one is
/// what lookups return.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenRepository {
    tokens: Arc<RwLock<HashMap<UserId, Vec<AuthToken>>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(records: Vec<AuthToken>) -> Self {
        let mut tokens: HashMap<UserId, Vec<AuthToken>> = HashMap::new();

        for record in records {
            tokens.entry(record.user_id().clone()).or_default().push(record);
        }

        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_token_for_user(&self, user_id: &UserId) -> Result<Option<Token>, DomainError> {
        let tokens = self.tokens.read().await;

        Ok(tokens
            .get(user_id)
            .and_then(|records| records.first())
            .map(|record| record.token().clone()))
    }

    async fn create(&self, record: AuthToken) -> Result<AuthToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        let taken = tokens
            .values()
            .flatten()
            .any(|existing| existing.token() == record.token());

        // A token must resolve back to exactly one user
        if taken {
            return Err(DomainError::conflict("Token is already provisioned"));
        }

        tokens
            .entry(record.user_id().clone())
            .or_default()
            .push(record.clone());

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_find_token_for_user() {
        let repo = InMemoryTokenRepository::with_tokens(vec![AuthToken::new(
            Token::new("tok_123"),
            user("alice"),
        )]);

        let token = repo.find_token_for_user(&user("alice")).await.unwrap();
        assert_eq!(token, Some(Token::new("tok_123")));
    }

    #[tokio::test]
    async fn test_user_without_token() {
        let repo = InMemoryTokenRepository::new();

        let token = repo.find_token_for_user(&user("alice")).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_first_provisioned_token_wins() {
        let repo = InMemoryTokenRepository::new();
        repo.create(AuthToken::new(Token::new("tok_first"), user("alice")))
            .await
            .unwrap();
        repo.create(AuthToken::new(Token::new("tok_second"), user("alice")))
            .await
            .unwrap();

        let token = repo.find_token_for_user(&user("alice")).await.unwrap();
        assert_eq!(token, Some(Token::new("tok_first")));
    }

    #[tokio::test]
    async fn test_token_cannot_be_shared() {
        let repo = InMemoryTokenRepository::new();
        repo.create(AuthToken::new(Token::new("tok_123"), user("alice")))
            .await
            .unwrap();

        let result = repo
            .create(AuthToken::new(Token::new("tok_123"), user("bob")))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }
}
