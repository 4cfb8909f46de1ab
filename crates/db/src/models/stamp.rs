//! Stamp entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timeclock_core::stamp::StampType;
use timeclock_core::types::{DbId, Timestamp};

/// Full stamp row from the `stamps` table.
///
/// Immutable once written except through the optimistic-versioned update
/// path: `version` is bumped on every update and must match on the way in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stamp {
    pub id: DbId,
    pub user_id: DbId,
    pub stamp_type: StampType,
    pub stamp_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: i32,
}

/// DTO for creating a new stamp.
///
/// `stamp_time` is optional: the server uses "now" when the client omits it.
#[derive(Debug, Deserialize)]
pub struct CreateStamp {
    pub stamp_type: StampType,
    pub stamp_time: Option<Timestamp>,
}

/// DTO for the optimistic-versioned stamp update.
///
/// All fields are required: the caller edits a specific known revision, so a
/// partial patch has nothing to preserve.
#[derive(Debug, Deserialize)]
pub struct UpdateStamp {
    pub stamp_type: StampType,
    pub stamp_time: Timestamp,
    pub version: i32,
}

/// Sort direction for the stamp feed. Restricting this to an enum keeps the
/// direction out of string interpolation in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
