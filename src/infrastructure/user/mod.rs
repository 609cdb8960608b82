//! User infrastructure
//!
//! Argon2 password hashing, in-memory and PostgreSQL user repositories, the
//! user-backed credential store and account provisioning.

mod credential_store;
mod password;
mod postgres_repository;
mod repository;
mod service;

pub use credential_store::UserCredentialStore;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UserService};
