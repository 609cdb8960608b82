//! PostgreSQL token store

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::token::{AuthToken, Token, TokenRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Token store over the `token_auth` table
#[derive(Debug, Clone)]
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn find_token_for_user(&self, user_id: &UserId) -> Result<Option<Token>, DomainError> {
        let token: Option<String> = sqlx::query_scalar(
            r#"
            SELECT token
            FROM token_auth
            WHERE user_id = $1
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to look up token: {}", e)))?;

        Ok(token.map(Token::new))
    }

    async fn create(&self, record: AuthToken) -> Result<AuthToken, DomainError> {
        sqlx::query("INSERT INTO token_auth (token, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(record.token().as_str())
            .bind(record.user_id().as_str())
            .bind(record.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => {
                    DomainError::conflict("Token is already provisioned")
                }
                _ => DomainError::storage(format!("Failed to store token: {}", e)),
            })?;

        Ok(record)
    }
}
