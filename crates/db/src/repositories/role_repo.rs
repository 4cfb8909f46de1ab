//! Repository for the `roles` table.

use sqlx::PgPool;
use timeclock_core::types::DbId;

use crate::models::role::Role;

/// Provides lookups for roles. Rows are seeded by migration and never
/// written at runtime.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, level, description FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Find a role by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>("SELECT id, name, level, description FROM roles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a role id to its name. Missing roles are a data-integrity
    /// failure, reported as `RowNotFound`.
    pub async fn resolve_name(pool: &PgPool, id: DbId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
