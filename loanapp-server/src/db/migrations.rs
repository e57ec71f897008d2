//! Schema creation for the `users` and `loans` tables
//!
//! Runs against PRIMARY only. Every statement is idempotent.

use sqlx::PgPool;

use super::DbError;

/// Create tables and indexes if missing
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running loanapp migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(50) NOT NULL,
            firstname VARCHAR(50) NOT NULL,
            lastname VARCHAR(50) NOT NULL,
            age INTEGER NOT NULL,
            address VARCHAR(255) NOT NULL,
            monthly_income DOUBLE PRECISION NOT NULL,
            CONSTRAINT users_username_key UNIQUE (username)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS loans (
            id SERIAL PRIMARY KEY,
            amount DOUBLE PRECISION NOT NULL,
            term_months INTEGER NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'Pending',
            user_id INTEGER NOT NULL,
            CONSTRAINT loans_user_id_fkey FOREIGN KEY (user_id) REFERENCES users(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_loans_user_id ON loans(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("loanapp migrations complete");
    Ok(())
}
