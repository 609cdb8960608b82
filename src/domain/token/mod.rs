//! Token domain
//!
//! Opaque bearer tokens and the store that maps user identities to them.

mod entity;
mod repository;

pub use entity::{AuthToken, Token};
pub use repository::TokenRepository;

#[cfg(test)]
pub use repository::MockTokenRepository;
