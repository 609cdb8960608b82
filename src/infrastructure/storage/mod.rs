//! PostgreSQL connection and schema setup

mod migrations;

pub use migrations::{auth_migrations, Migration, PostgresMigrator};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::domain::DomainError;

const MAX_CONNECTIONS: u32 = 10;

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, DomainError> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    PostgresMigrator::new(pool.clone()).run().await?;
    info!("PostgreSQL connection established");

    Ok(pool)
}
