//! Token store contract

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{AuthToken, Token};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read side of the token store, plus provisioning
///
/// Issuing, rotating and revoking tokens is owned elsewhere; the login flow
/// only ever calls [`TokenRepository::find_token_for_user`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync + Debug {
    /// Token associated with a user, or `None` if none was provisioned
    ///
    /// When several tokens exist for the same user the earliest one wins.
    async fn find_token_for_user(&self, user_id: &UserId) -> Result<Option<Token>, DomainError>;

    /// Store a provisioned token
    async fn create(&self, record: AuthToken) -> Result<AuthToken, DomainError>;
}
