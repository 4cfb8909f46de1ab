//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the repositories in `timeclock_db` and map errors
//! via [`crate::error::AppError`].

pub mod auth;
pub mod health;
pub mod shifts;
pub mod timestamps;
pub mod users;
