//! Role entity model.

use serde::Serialize;
use sqlx::FromRow;
use timeclock_core::types::DbId;

/// A role row from the `roles` table.
///
/// `level` orders roles for precedence checks: a caller satisfies a gate
/// when their role's level is at least the required role's level.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub description: Option<String>,
}
