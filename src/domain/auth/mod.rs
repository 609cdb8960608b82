//! Authentication contracts
//!
//! [`CredentialStore`] verifies credentials, [`TokenProvider`] turns them
//! into a token.

mod credentials;
mod provider;

pub use credentials::{CredentialStore, Credentials};
pub use provider::TokenProvider;

#[cfg(test)]
pub use credentials::MockCredentialStore;
#[cfg(test)]
pub use provider::MockTokenProvider;
