//! Repository for the `users` and `user_tokens` tables.

use sqlx::PgPool;
use timeclock_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, role_id, is_active, created_at";

/// Token purpose discriminators for the `user_tokens` table.
pub const TOKEN_INVITATION: &str = "invitation";
pub const TOKEN_PASSWORD_RESET: &str = "password-reset";

/// Provides CRUD operations for users and their one-shot tokens.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new (inactive) user together with its hashed invitation
    /// token, in one transaction.
    ///
    /// A duplicate email fails with the `uq_users_email` unique violation,
    /// which the API layer reports as a conflict.
    pub async fn create_and_invite(
        pool: &PgPool,
        input: &CreateUser,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (email, first_name, last_name, password_hash, role_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO user_tokens (token_hash, user_id, purpose, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(token_hash)
        .bind(user.id)
        .bind(TOKEN_INVITATION)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                role_id = COALESCE($5, role_id),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user by id (stamps and tokens cascade). Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Activate the account that owns the given unexpired invitation token,
    /// consuming the token. Returns `true` when a user was activated.
    pub async fn activate_by_token(pool: &PgPool, token_hash: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<DbId> = sqlx::query_scalar(
            "DELETE FROM user_tokens
             WHERE token_hash = $1 AND purpose = $2 AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .bind(TOKEN_INVITATION)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Store a hashed password-reset token for the user.
    pub async fn store_reset_token(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_tokens (token_hash, user_id, purpose, expires_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(TOKEN_PASSWORD_RESET)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Set a new password hash for the owner of the given unexpired reset
    /// token, consuming the token. Returns `true` when a password changed.
    pub async fn reset_password_by_token(
        pool: &PgPool,
        token_hash: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_id: Option<DbId> = sqlx::query_scalar(
            "DELETE FROM user_tokens
             WHERE token_hash = $1 AND purpose = $2 AND expires_at > NOW()
             RETURNING user_id",
        )
        .bind(token_hash)
        .bind(TOKEN_PASSWORD_RESET)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_id) = user_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn change_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
