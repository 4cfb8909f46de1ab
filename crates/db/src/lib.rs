//! PostgreSQL persistence for the timeclock backend.
//!
//! Row models and DTOs live in [`models`]; query code lives in
//! [`repositories`] as unit structs with static async methods taking a
//! `&PgPool`. SQL migrations are at `db/migrations/` in the workspace root.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Error type for repository operations that mix domain validation with SQL.
///
/// Most repository methods return plain `sqlx::Error`; methods that also run
/// domain checks (stamp creation) return this instead so callers can map the
/// two failure classes to different responses.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] timeclock_core::error::CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create a connection pool from a database URL.
///
/// Connection acquisition is bounded so a saturated pool fails a request
/// instead of queueing past its deadline.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
