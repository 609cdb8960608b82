//! Token store implementations and token generation

mod generator;
mod postgres_repository;
mod repository;

pub use generator::TokenGenerator;
pub use postgres_repository::PostgresTokenRepository;
pub use repository::InMemoryTokenRepository;
