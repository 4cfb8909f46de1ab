//! Shift reconstruction from a chronological stamp stream.
//!
//! A shift is a derived aggregate: it has no row of its own and is recomputed
//! on demand by folding a user's stamps in ascending time order. The fold is
//! a single forward pass with constant auxiliary state (the open shift, if
//! any, and the open break start, if any).

use serde::Serialize;

use crate::stamp::StampType;
use crate::types::Timestamp;

/// A completed break interval inside a shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Break {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// A completed work shift spanning one sign-in to its matching sign-out.
///
/// All durations are real-valued seconds. `net_work_time` is always
/// `total_shift_time - total_break_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shift {
    pub sign_in: Timestamp,
    pub sign_out: Timestamp,
    pub breaks: Vec<Break>,
    pub total_break_time: f64,
    pub total_shift_time: f64,
    pub net_work_time: f64,
}

/// Shift being accumulated while the fold walks the stream.
struct OpenShift {
    sign_in: Timestamp,
    breaks: Vec<Break>,
    total_break_time: f64,
    open_break_start: Option<Timestamp>,
}

fn seconds_between(start: Timestamp, end: Timestamp) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// Fold stamps, given in ascending `stamp_time` order, into completed shifts.
///
/// Behavior per stamp type:
/// - `sign-in` opens a shift when none is open; a second sign-in inside an
///   open shift is ignored (validated writes never produce one).
/// - `start-break` marks a break start when a shift is open and no break is.
/// - `end-break` closes an open break and accumulates its duration.
/// - `sign-out` closes the open shift and emits it.
///
/// A trailing open shift is dropped: only finished shifts are returned. The
/// fold is deterministic, so reconstructing the same immutable sequence
/// twice yields identical results.
pub fn fold_shifts(stamps: &[(StampType, Timestamp)]) -> Vec<Shift> {
    let mut shifts = Vec::new();
    let mut current: Option<OpenShift> = None;

    for &(stamp_type, stamp_time) in stamps {
        match stamp_type {
            StampType::SignIn => {
                if current.is_none() {
                    current = Some(OpenShift {
                        sign_in: stamp_time,
                        breaks: Vec::new(),
                        total_break_time: 0.0,
                        open_break_start: None,
                    });
                }
            }
            StampType::StartBreak => {
                if let Some(shift) = current.as_mut() {
                    if shift.open_break_start.is_none() {
                        shift.open_break_start = Some(stamp_time);
                    }
                }
            }
            StampType::EndBreak => {
                if let Some(shift) = current.as_mut() {
                    if let Some(start) = shift.open_break_start.take() {
                        shift.breaks.push(Break {
                            start,
                            end: stamp_time,
                        });
                        shift.total_break_time += seconds_between(start, stamp_time);
                    }
                }
            }
            StampType::SignOut => {
                if let Some(shift) = current.take() {
                    let total_shift_time = seconds_between(shift.sign_in, stamp_time);
                    shifts.push(Shift {
                        sign_in: shift.sign_in,
                        sign_out: stamp_time,
                        breaks: shift.breaks,
                        total_break_time: shift.total_break_time,
                        total_shift_time,
                        net_work_time: total_shift_time - shift.total_break_time,
                    });
                }
            }
        }
    }

    shifts
}
