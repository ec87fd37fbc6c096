//! Running the attempt loop.

use tracing::{debug, info, warn};

use super::{AttemptRecord, LockConfiguration, SimulationOutcome, SimulationResult};
use crate::degree::{Degree, evaluate};
use crate::dice::{D20, FaceSource};
use crate::error::{LockError, LockResult};

/// What the best possible roll can achieve against a DC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feasibility {
    /// A natural 20 reaches at least a success.
    Progress,
    /// A natural 20 only lifts a critical failure to a plain failure, so the
    /// loop runs but can never make progress.
    NoProgress,
    /// Even a natural 20 stays a critical failure.
    Infeasible,
}

/// Classify how far the best possible roll gets.
///
/// The loop is allowed to run whenever the best total reaches the failure
/// band (`DC - 10` or higher). That is permissive: at exactly `DC - 10` a
/// natural 20 only produces a failure.
pub fn feasibility(total_modifier: i32, dc: i32) -> Feasibility {
    let best_total = total_modifier.saturating_add(D20 as i32);
    if best_total < dc.saturating_sub(10) {
        Feasibility::Infeasible
    } else if evaluate(best_total, dc, D20).is_success() {
        Feasibility::Progress
    } else {
        Feasibility::NoProgress
    }
}

/// Run the attempt loop to completion.
///
/// Returns [`LockError::InfeasibleConfiguration`] without rolling when even a
/// natural 20 cannot leave the critical-failure band. Otherwise the loop runs
/// until the lock opens, a critical failure aborts it (if configured), or the
/// attempt cap is reached.
pub fn run<D>(
    total_modifier: i32,
    config: &LockConfiguration,
    dice: &mut D,
) -> LockResult<SimulationResult>
where
    D: FaceSource + ?Sized,
{
    let dc = config.difficulty_class;
    match feasibility(total_modifier, dc) {
        Feasibility::Infeasible => {
            return Err(LockError::InfeasibleConfiguration {
                modifier: total_modifier,
                dc,
            });
        }
        Feasibility::NoProgress => {
            warn!(
                modifier = total_modifier,
                dc, "a natural 20 only reaches a failure; the lock cannot be opened"
            );
        }
        Feasibility::Progress => {}
    }

    let required = config.required_successes.max(1);
    let cap = config.effective_cap();
    let mut sneaky_key = config.sneaky_key_active;
    let mut attempts: Vec<AttemptRecord> = Vec::new();
    let mut progress = 0u32;
    let mut minutes = 0u64;
    let mut tools_broken = false;
    let mut aborted = false;

    while progress < required && (attempts.len() as u32) < cap {
        let attempt_number = attempts.len() as u32 + 1;
        let die_face = dice.roll_d20();
        let total = total_modifier.saturating_add(die_face as i32);
        let degree = evaluate(total, dc, die_face);

        let (mut gained, mut note) = match degree {
            Degree::CriticalSuccess => (2, String::from("Critical success (+2)")),
            Degree::Success => (1, String::from("Success (+1)")),
            Degree::Failure => (0, String::from("Failure")),
            Degree::CriticalFailure => {
                tools_broken = true;
                (0, String::from("Critical failure, tools damaged!"))
            }
        };

        // Sneaky Key: consumed by the first success of the run.
        if sneaky_key && degree.is_success() {
            gained += 1;
            note.push_str(" | Sneaky Key: +1 progress");
            sneaky_key = false;
        }

        progress = progress.saturating_add(gained);
        minutes = minutes.saturating_add(u64::from(config.minutes_per_attempt));
        debug!(attempt_number, die_face, total, ?degree, gained, progress, "lock attempt");
        attempts.push(AttemptRecord {
            attempt_number,
            die_face,
            total,
            degree,
            progress_gained: gained,
            note,
        });

        if degree == Degree::CriticalFailure && config.stop_on_critical_failure {
            aborted = true;
            break;
        }
    }

    let outcome = if progress >= required {
        SimulationOutcome::Opened
    } else if aborted {
        SimulationOutcome::CriticalFailureAbort
    } else if attempts.len() as u32 >= cap {
        SimulationOutcome::AttemptLimitAbort
    } else {
        SimulationOutcome::Incomplete
    };

    info!(
        attempts = attempts.len(),
        progress,
        required,
        minutes,
        ?outcome,
        "lock-picking run finished"
    );

    Ok(SimulationResult {
        attempts,
        final_progress: progress,
        required_successes: required,
        total_minutes_spent: minutes,
        tools_broken,
        effective_cap: cap,
        outcome,
    })
}
