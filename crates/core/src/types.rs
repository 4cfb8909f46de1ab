//! Shared primitive type aliases.

/// Internal database identifier (BIGSERIAL).
pub type DbId = i64;

/// UTC instant used for all persisted times.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
