//! Database side of the `unique` validation rule.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod error;
pub mod unique_rule;

pub use config::DbConfig;
pub use error::UniqueRuleError;
pub use unique_rule::UniqueRule;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from loaded configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
