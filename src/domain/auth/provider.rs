use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::token::Token;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Turns a username and password into a bearer token
///
/// This is the extension point of the login flow: the endpoint only ever
/// holds an `Arc<dyn TokenProvider>`, so a deployment can swap in its own
/// backend (JWT issuing, an external identity provider, ...).
///
/// Callers pass non-empty values. Wrong credentials are not an error: they
/// come back as `Ok(None)`. `Err` means the provider could not decide.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync + Debug {
    async fn get_token(&self, username: &str, password: &str) -> Result<Option<Token>, DomainError>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}
