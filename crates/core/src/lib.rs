//! Domain types and logic for the timeclock backend.
//!
//! This crate is pure: no I/O, no async. It holds the stamp transition
//! rules, the shift reconstruction fold, role precedence constants, and the
//! domain error enum shared by the persistence and HTTP layers.

pub mod error;
pub mod roles;
pub mod shift;
pub mod stamp;
pub mod types;
