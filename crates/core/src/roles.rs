//! Well-known role name constants.
//!
//! These must match the seed data in `db/migrations/0001_roles_users_stamps.sql`.
//! Precedence is decided by the `level` column on the roles table, not by
//! these constants; the constants exist so route gates and seed data agree
//! on spelling.

pub const ROLE_USER: &str = "user";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_ADMIN: &str = "admin";
