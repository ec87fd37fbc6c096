//! The lock-picking attempt loop.
//!
//! Picking a lock takes several successful checks. Each attempt rolls a d20,
//! turns the degree of success into progress, and logs an [`AttemptRecord`].
//! The loop stops once enough progress is made, when a critical failure breaks
//! the tools (if configured to abort), or when the attempt cap is hit.

pub mod config;
pub mod preset;
pub mod simulate;

pub use config::LockConfiguration;
pub use preset::LockPreset;
pub use simulate::{Feasibility, feasibility, run};

use serde::{Deserialize, Serialize};

use crate::degree::Degree;

/// Lower bound of the automatic attempt cap.
pub const AUTO_CAP_MIN: u32 = 30;
/// Upper bound of the automatic attempt cap.
pub const AUTO_CAP_MAX: u32 = 300;
/// Attempts per required success used by the automatic cap.
pub const AUTO_CAP_PER_SUCCESS: u32 = 10;
/// Absolute ceiling on attempts in one run, whatever the configuration says.
pub const HARD_ATTEMPT_CEILING: u32 = 1000;

/// One iteration of the attempt loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt_number: u32,
    /// The natural d20 face.
    pub die_face: u32,
    /// Face plus total modifier.
    pub total: i32,
    /// Degree of success of this attempt.
    pub degree: Degree,
    /// Progress gained by this attempt, Sneaky Key included.
    pub progress_gained: u32,
    /// Human-readable description of what happened.
    pub note: String,
}

/// Why the attempt loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationOutcome {
    /// Enough progress was made.
    Opened,
    /// A critical failure broke the tools and the run was configured to stop.
    CriticalFailureAbort,
    /// The attempt cap was reached first.
    AttemptLimitAbort,
    /// The loop ended without any of the above.
    Incomplete,
}

impl std::fmt::Display for SimulationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opened => write!(f, "Lock opened"),
            Self::CriticalFailureAbort => write!(f, "Aborted: critical failure (tools broken)"),
            Self::AttemptLimitAbort => write!(f, "Aborted: attempt limit reached"),
            Self::Incomplete => write!(f, "Not opened"),
        }
    }
}

/// The complete trace of one attempt-loop run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Every attempt, in the order it was rolled.
    pub attempts: Vec<AttemptRecord>,
    /// Accumulated progress (may exceed the requirement on a critical success).
    pub final_progress: u32,
    /// Successes the lock required.
    pub required_successes: u32,
    /// Minutes spent over all attempts.
    pub total_minutes_spent: u64,
    /// Whether any attempt was a critical failure.
    pub tools_broken: bool,
    /// The attempt cap that bounded this run.
    pub effective_cap: u32,
    /// How the run ended.
    pub outcome: SimulationOutcome,
}

impl SimulationResult {
    /// Number of attempts rolled.
    pub fn attempts_taken(&self) -> u32 {
        self.attempts.len() as u32
    }

    /// Whether the lock was opened.
    pub fn is_opened(&self) -> bool {
        self.outcome == SimulationOutcome::Opened
    }
}
