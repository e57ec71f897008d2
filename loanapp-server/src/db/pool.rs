//! Database connection pool management
//!
//! One sqlx `PgPool` per store role, with explicit connection limits.

use loanapp_core::StoreConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a PostgreSQL connection pool, connecting eagerly.
///
/// # Errors
///
/// Returns an error if the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&config.primary).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Create a pool that connects on first use.
///
/// Only the connection string is validated here; an unreachable store
/// surfaces as an error on the first `acquire`.
pub fn create_lazy_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.url)
}
