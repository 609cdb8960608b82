//! Token value and provisioned token record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

const DEBUG_PREFIX_LEN: usize = 4;

/// Opaque bearer token
///
/// Serializes as a bare string. `Debug` only shows the first few characters
/// so a token never lands in logs in full.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(DEBUG_PREFIX_LEN).collect();
        write!(f, "Token({}…)", prefix)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A token provisioned for a user in the token store
#[derive(Debug, Clone)]
pub struct AuthToken {
    token: Token,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(token: Token, user_id: UserId) -> Self {
        Self {
            token,
            user_id,
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
