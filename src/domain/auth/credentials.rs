//! Submitted credentials and the store that verifies them

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A username/password pair, both guaranteed non-empty
///
/// Lives for a single request. The password is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Build credentials from optional request fields
    ///
    /// Returns `None` when either part is missing or empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self { username, password })
            }
            _ => None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Verifies a username/password pair against stored accounts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync + Debug {
    /// Identity of the matching user
    ///
    /// `Ok(None)` means the pair does not belong to an active account. `Err`
    /// is reserved for the store itself failing.
    async fn verify(&self, username: &str, password: &str) -> Result<Option<UserId>, DomainError>;
}
