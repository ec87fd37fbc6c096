//! Request rolls: roll a check until it lands on a decisive result.
//!
//! A request roll is attached to an inline `@Check[...]` tag. When triggered,
//! the resolver keeps rolling the check until the result is a success, a
//! critical success, or a critical failure. A plain failure rolls again. Each
//! trigger is an independent run with its own rolls.

pub mod tag;

pub use tag::{RequestCheckSpec, extract_inline_check};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::degree::{Degree, evaluate};
use crate::dice::FaceSource;

/// Maximum number of rolls in one request-roll run.
pub const REQUEST_ROLL_CAP: u32 = 200;

/// One roll of a request-roll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRoll {
    /// 1-based roll number.
    pub roll_number: u32,
    /// The natural d20 face.
    pub die_face: u32,
    /// Face plus modifier.
    pub total: i32,
    /// Degree of success of this roll.
    pub degree: Degree,
}

/// Why a request-roll run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// The last roll was a critical success.
    CriticalSuccess,
    /// The last roll was a success.
    Success,
    /// The last roll was a critical failure.
    CriticalFailure,
    /// The roll cap was reached on plain failures only.
    Exhausted,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalSuccess => write!(f, "Critical Success"),
            Self::Success => write!(f, "Success"),
            Self::CriticalFailure => write!(f, "Critical Failure"),
            Self::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// The trace of one request-roll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRollResult {
    /// Every roll, in order.
    pub rolls: Vec<RequestRoll>,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Roll until a decisive result or the roll cap.
pub fn resolve<D>(total_modifier: i32, dc: i32, dice: &mut D) -> RequestRollResult
where
    D: FaceSource + ?Sized,
{
    let mut rolls = Vec::new();
    while (rolls.len() as u32) < REQUEST_ROLL_CAP {
        let die_face = dice.roll_d20();
        let total = total_modifier.saturating_add(die_face as i32);
        let degree = evaluate(total, dc, die_face);
        rolls.push(RequestRoll {
            roll_number: rolls.len() as u32 + 1,
            die_face,
            total,
            degree,
        });

        let stop = match degree {
            Degree::CriticalSuccess => Some(StopReason::CriticalSuccess),
            Degree::Success => Some(StopReason::Success),
            Degree::CriticalFailure => Some(StopReason::CriticalFailure),
            Degree::Failure => None,
        };
        if let Some(stop_reason) = stop {
            debug!(rolls = rolls.len(), ?stop_reason, "request roll resolved");
            return RequestRollResult { rolls, stop_reason };
        }
    }

    debug!(rolls = rolls.len(), "request roll exhausted");
    RequestRollResult {
        rolls,
        stop_reason: StopReason::Exhausted,
    }
}
