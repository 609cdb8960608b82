//! Domain layer - Core types and capability traits

pub mod auth;
pub mod error;
pub mod token;
pub mod user;

pub use auth::{CredentialStore, Credentials, TokenProvider};
pub use error::DomainError;
pub use token::{AuthToken, Token, TokenRepository};
pub use user::{User, UserId, UserRepository, UserStatus};
