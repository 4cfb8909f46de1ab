//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timeclock_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Resolved role name (e.g. `"user"`, `"manager"`).
    pub role: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl UserResponse {
    pub fn from_user(user: User, role: String) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role,
            role_id: user.role_id,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}
