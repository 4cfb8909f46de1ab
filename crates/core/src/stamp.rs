//! Attendance stamp types and the transition validator.
//!
//! A user's stamp history forms a sequence that must follow a closed
//! transition graph: a shift opens with `sign-in`, may contain
//! `start-break`/`end-break` pairs, and closes with `sign-out`. The allowed
//! predecessors for each stamp type are kept as data on the enum so the
//! table is unit-testable in isolation and a new stamp type is a one-arm
//! edit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of attendance event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "stamp_type", rename_all = "kebab-case")]
pub enum StampType {
    SignIn,
    StartBreak,
    EndBreak,
    SignOut,
}

impl StampType {
    /// Stamp types that may immediately precede `self` in a user's history.
    ///
    /// `sign-in` is additionally legal as the very first stamp; that case is
    /// handled by [`validate_transition`], not by this table.
    pub const fn allowed_predecessors(self) -> &'static [StampType] {
        match self {
            Self::SignIn => &[Self::SignOut],
            Self::SignOut => &[Self::SignIn, Self::EndBreak],
            Self::StartBreak => &[Self::SignIn, Self::EndBreak],
            Self::EndBreak => &[Self::StartBreak],
        }
    }

    /// The wire/storage spelling (`sign-in`, `start-break`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::StartBreak => "start-break",
            Self::EndBreak => "end-break",
            Self::SignOut => "sign-out",
        }
    }
}

impl fmt::Display for StampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StampType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign-in" => Ok(Self::SignIn),
            "start-break" => Ok(Self::StartBreak),
            "end-break" => Ok(Self::EndBreak),
            "sign-out" => Ok(Self::SignOut),
            other => Err(CoreError::Validation(format!(
                "Invalid stamp type: '{other}'"
            ))),
        }
    }
}

/// Decide whether `next` is a legal continuation of a history whose most
/// recent stamp is `previous` (`None` when the user has no stamps yet).
///
/// Rules, checked in order:
/// 1. An empty history only accepts `sign-in`.
/// 2. Two consecutive stamps of the same type are never legal.
/// 3. Otherwise `previous` must be in `next`'s allowed-predecessor set.
///
/// Violations are [`CoreError::Validation`] so they surface as client
/// errors, never as internal ones.
pub fn validate_transition(
    previous: Option<StampType>,
    next: StampType,
) -> Result<(), CoreError> {
    let Some(previous) = previous else {
        if next == StampType::SignIn {
            return Ok(());
        }
        return Err(CoreError::Validation(
            "First action must be sign-in".to_string(),
        ));
    };

    if previous == next {
        return Err(CoreError::Validation(format!(
            "Duplicate stamp type: '{next}' cannot follow '{previous}'"
        )));
    }

    if !next.allowed_predecessors().contains(&previous) {
        return Err(CoreError::Validation(format!(
            "Invalid transition from '{previous}' to '{next}'"
        )));
    }

    Ok(())
}
