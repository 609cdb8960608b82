//! JWT-issuing token provider

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

use crate::domain::auth::{CredentialStore, TokenProvider};
use crate::domain::token::Token;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix epoch)
    pub iat: i64,
    /// Expiration (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user_id: &UserId, expiration_hours: u64) -> Result<Self, DomainError> {
        let now = Utc::now();
        let exp = i64::try_from(expiration_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "JWT expiration of {} hours is out of range",
                    expiration_hours
                ))
            })?;

        Ok(Self {
            sub: user_id.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Longest accepted token lifetime: one year
pub const MAX_EXPIRATION_HOURS: u64 = 24 * 365;

#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.secret.is_empty() {
            return Err(DomainError::configuration("JWT secret must not be empty"));
        }

        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(DomainError::configuration(format!(
                "JWT expiration must be between 1 and {} hours, got {}",
                MAX_EXPIRATION_HOURS, self.expiration_hours
            )));
        }

        Ok(())
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Issues a freshly signed JWT for every successful credential check
///
/// Unlike [`super::StoreTokenProvider`] nothing is looked up after the
/// credential check: the token is minted from the verified user ID.
#[derive(Clone)]
pub struct JwtTokenProvider {
    credentials: Arc<dyn CredentialStore>,
    expiration_hours: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenProvider")
            .field("credentials", &self.credentials)
            .field("expiration_hours", &self.expiration_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenProvider {
    /// Fails for an empty secret or an out-of-range expiration
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        config: JwtConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            credentials,
            expiration_hours: config.expiration_hours,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        })
    }

    pub fn issue(&self, user_id: &UserId) -> Result<Token, DomainError> {
        let claims = JwtClaims::new(user_id, self.expiration_hours)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map(Token::new)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    /// Check signature and expiry of a token issued by this provider
    pub fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::validation(format!("Invalid JWT: {}", e)))
    }
}

#[async_trait]
impl TokenProvider for JwtTokenProvider {
    async fn get_token(&self, username: &str, password: &str) -> Result<Option<Token>, DomainError> {
        match self.credentials.verify(username, password).await? {
            Some(user_id) => self.issue(&user_id).map(Some),
            None => Ok(None),
        }
    }

    fn provider_name(&self) -> &'static str {
        "jwt"
    }
}
