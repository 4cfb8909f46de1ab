//! Repository for the `stamps` table.

use sqlx::PgPool;
use timeclock_core::stamp::{validate_transition, StampType};
use timeclock_core::types::{DbId, Timestamp};

use crate::models::stamp::{SortOrder, Stamp, UpdateStamp};
use crate::RepoError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, stamp_type, stamp_time, created_at, updated_at, version";

/// Provides CRUD operations and ordered reads for stamps.
pub struct StampRepo;

impl StampRepo {
    /// Insert a new stamp after validating the transition against the
    /// persisted latest stamp.
    ///
    /// The whole validate-then-insert sequence runs inside one transaction
    /// holding a per-user advisory lock, so two concurrent creates for the
    /// same user are serialized and cannot both observe the same latest
    /// stamp. Returns [`RepoError::Core`] with a validation error when the
    /// transition is illegal; the log never persists an illegal sequence.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        stamp_type: StampType,
        stamp_time: Timestamp,
    ) -> Result<Stamp, RepoError> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let latest: Option<StampType> = sqlx::query_scalar(
            "SELECT stamp_type FROM stamps
             WHERE user_id = $1
             ORDER BY stamp_time DESC, id DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        validate_transition(latest, stamp_type)?;

        let query = format!(
            "INSERT INTO stamps (user_id, stamp_type, stamp_time)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let stamp = sqlx::query_as::<_, Stamp>(&query)
            .bind(user_id)
            .bind(stamp_type)
            .bind(stamp_time)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(user_id, stamp_id = stamp.id, %stamp_type, "stamp created");
        Ok(stamp)
    }

    /// The user's most recent stamp by time descending (ties broken by id).
    pub async fn latest(pool: &PgPool, user_id: DbId) -> Result<Option<Stamp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stamps
             WHERE user_id = $1
             ORDER BY stamp_time DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Stamp>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a stamp by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Stamp>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stamps WHERE id = $1");
        sqlx::query_as::<_, Stamp>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A time-ordered page of the user's stamps.
    pub async fn feed(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
        sort: SortOrder,
    ) -> Result<Vec<Stamp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stamps
             WHERE user_id = $1
             ORDER BY stamp_time {dir}, id {dir}
             LIMIT $2 OFFSET $3",
            dir = sort.as_sql()
        );
        sqlx::query_as::<_, Stamp>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The user's full `(stamp_type, stamp_time)` sequence in ascending time
    /// order. This feeds the shift reconstructor.
    pub async fn stamps_ascending(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<(StampType, Timestamp)>, sqlx::Error> {
        sqlx::query_as::<_, (StampType, Timestamp)>(
            "SELECT stamp_type, stamp_time FROM stamps
             WHERE user_id = $1
             ORDER BY stamp_time ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Optimistic compare-and-swap update.
    ///
    /// Applies the new type/time only when `input.version` matches the
    /// stored version, bumping the version and `updated_at`. Returns `None`
    /// when no row matched -- either the id does not exist or the caller's
    /// version is stale; the compare-and-swap cannot tell the two apart.
    ///
    /// Does not re-validate the edited stamp against its neighbors in the
    /// sequence; the caller is expected to know what they are doing.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStamp,
    ) -> Result<Option<Stamp>, sqlx::Error> {
        let query = format!(
            "UPDATE stamps SET
                stamp_type = $2,
                stamp_time = $3,
                version = version + 1,
                updated_at = NOW()
             WHERE id = $1 AND version = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Stamp>(&query)
            .bind(id)
            .bind(input.stamp_type)
            .bind(input.stamp_time)
            .bind(input.version)
            .fetch_optional(pool)
            .await
    }

    /// Delete a stamp by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stamps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
