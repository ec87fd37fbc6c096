//! Turning run traces into reports.

use super::{Audience, Fact, Report, ReportRow, Tone, Verdict};
use crate::lock::{SimulationOutcome, SimulationResult};
use crate::modifier::AggregatedModifier;
use crate::request::{REQUEST_ROLL_CAP, RequestCheckSpec, RequestRollResult, StopReason};

/// What a simulation report needs besides the result itself.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    /// Name of the actor picking the lock.
    pub actor_name: String,
    /// Label of the skill used.
    pub skill: String,
    /// Base modifier plus stacked bonuses.
    pub total_modifier: i32,
    /// The stacked bonuses, for the breakdown line.
    pub bonuses: AggregatedModifier,
    /// Lock quality label.
    pub lock: String,
    /// Difficulty class.
    pub dc: i32,
    /// Whether silent dice were used.
    pub silent: bool,
    /// Whether the report is whispered to the roller.
    pub whisper: bool,
    /// Inline check attached for a later request roll: the parsed spec, or the
    /// reason it was rejected.
    pub request: Option<Result<RequestCheckSpec, String>>,
}

/// What a request-roll report needs besides the result itself.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Name of the actor who rolled.
    pub actor_name: String,
    /// The check that was rolled.
    pub spec: RequestCheckSpec,
    /// The actor's modifier for it.
    pub modifier: i32,
}

/// Format a modifier with an explicit sign (`+3`, `+0`, `-2`).
pub fn format_signed(value: i32) -> String {
    format!("{value:+}")
}

fn fact(label: &str, value: impl Into<String>) -> Fact {
    Fact {
        label: label.to_string(),
        value: value.into(),
    }
}

fn bonus_breakdown(bonuses: &AggregatedModifier) -> String {
    format!(
        "Item {}, Status {}, Circumstance {}, Untyped {}",
        format_signed(bonuses.item_effective),
        format_signed(bonuses.status_effective),
        format_signed(bonuses.circumstance_sum),
        format_signed(bonuses.untyped_sum),
    )
}

/// Build the report of an attempt-loop run.
///
/// Every attempt appears once, in roll order.
pub fn render_simulation(result: &SimulationResult, ctx: &SimulationContext) -> Report {
    let mut facts = vec![
        fact("Actor", ctx.actor_name.as_str()),
        fact("Skill", ctx.skill.as_str()),
        fact("Total modifier", format_signed(ctx.total_modifier)),
        fact("Bonuses", bonus_breakdown(&ctx.bonuses)),
        fact("Lock", ctx.lock.as_str()),
        fact("DC", ctx.dc.to_string()),
        fact("Successes needed", result.required_successes.to_string()),
        fact("Dice", if ctx.silent { "Silent" } else { "Host" }),
        fact("Attempts", result.attempts_taken().to_string()),
        fact(
            "Progress",
            format!("{}/{}", result.final_progress, result.required_successes),
        ),
        fact("Time", format!("{} min", result.total_minutes_spent)),
    ];
    match &ctx.request {
        Some(Ok(spec)) => facts.push(fact("Request roll", spec.raw.as_str())),
        Some(Err(reason)) => facts.push(fact(
            "Request roll",
            format!("invalid or missing @Check tag ({reason})"),
        )),
        None => {}
    }

    let rows = result
        .attempts
        .iter()
        .map(|a| ReportRow {
            number: a.attempt_number,
            die_face: a.die_face,
            total: a.total,
            degree: a.degree,
            progress: Some(a.progress_gained),
            note: Some(a.note.clone()),
        })
        .collect();

    let tone = match result.outcome {
        SimulationOutcome::Opened => Tone::Positive,
        SimulationOutcome::CriticalFailureAbort => Tone::Danger,
        SimulationOutcome::AttemptLimitAbort => Tone::Warning,
        SimulationOutcome::Incomplete => Tone::Neutral,
    };
    let footnote = (result.outcome == SimulationOutcome::CriticalFailureAbort)
        .then(|| "Tools damaged, spare picks needed.".to_string());

    Report {
        title: "Pick a Lock".to_string(),
        audience: if ctx.whisper {
            Audience::Whisper
        } else {
            Audience::Public
        },
        facts,
        rows,
        verdict: Verdict {
            tone,
            text: result.outcome.to_string(),
        },
        footnote,
    }
}

/// Build the report of a request-roll run.
pub fn render_request(result: &RequestRollResult, ctx: &RequestContext) -> Report {
    let facts = vec![
        fact("Actor", ctx.actor_name.as_str()),
        fact(
            "Check",
            format!("{} vs. DC {}", ctx.spec.display_name(), ctx.spec.difficulty_class),
        ),
        fact("Modifier", format_signed(ctx.modifier)),
        fact("Stop", result.stop_reason.to_string()),
        fact("Rolls", result.rolls.len().to_string()),
    ];

    let rows = result
        .rolls
        .iter()
        .map(|r| ReportRow {
            number: r.roll_number,
            die_face: r.die_face,
            total: r.total,
            degree: r.degree,
            progress: None,
            note: None,
        })
        .collect();

    let verdict = match result.stop_reason {
        StopReason::CriticalSuccess => Verdict {
            tone: Tone::Positive,
            text: "Critical success".to_string(),
        },
        StopReason::Success => Verdict {
            tone: Tone::Positive,
            text: "Success".to_string(),
        },
        StopReason::CriticalFailure => Verdict {
            tone: Tone::Danger,
            text: "Critical failure".to_string(),
        },
        StopReason::Exhausted => Verdict {
            tone: Tone::Warning,
            text: format!("No decisive result after {REQUEST_ROLL_CAP} rolls"),
        },
    };

    Report {
        title: format!("Request Roll: {}", ctx.actor_name),
        audience: Audience::Public,
        facts,
        rows,
        verdict,
        footnote: None,
    }
}

/// Notice for the game masters that an actor broke their tools.
pub fn tool_breakage_notice(actor_name: &str) -> Report {
    Report {
        title: "Tool breakage".to_string(),
        audience: Audience::GameMasters,
        facts: Vec::new(),
        rows: Vec::new(),
        verdict: Verdict {
            tone: Tone::Danger,
            text: format!("{actor_name} critically failed at the lock (tools damaged)."),
        },
        footnote: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::degree::Degree;
    use crate::lock::AttemptRecord;
    use crate::request::RequestRoll;

    fn attempt(n: u32, face: u32, degree: Degree, gained: u32) -> AttemptRecord {
        AttemptRecord {
            attempt_number: n,
            die_face: face,
            total: face as i32 + 5,
            degree,
            progress_gained: gained,
            note: format!("note {n}"),
        }
    }

    fn result(outcome: SimulationOutcome, attempts: Vec<AttemptRecord>) -> SimulationResult {
        SimulationResult {
            final_progress: attempts.iter().map(|a| a.progress_gained).sum(),
            attempts,
            required_successes: 2,
            total_minutes_spent: 3,
            tools_broken: outcome == SimulationOutcome::CriticalFailureAbort,
            effective_cap: 30,
            outcome,
        }
    }

    fn ctx() -> SimulationContext {
        SimulationContext {
            actor_name: "Mira".to_string(),
            skill: "Thievery".to_string(),
            total_modifier: 5,
            bonuses: AggregatedModifier {
                item_effective: 1,
                status_effective: 0,
                circumstance_sum: 2,
                untyped_sum: -1,
                total: 2,
            },
            lock: "Poor (level 0)".to_string(),
            dc: 15,
            silent: true,
            whisper: false,
            request: None,
        }
    }

    #[test]
    fn rows_keep_order() {
        let r = result(
            SimulationOutcome::Opened,
            vec![
                attempt(1, 4, Degree::Failure, 0),
                attempt(2, 12, Degree::Success, 1),
                attempt(3, 14, Degree::Success, 1),
            ],
        );
        let report = render_simulation(&r, &ctx());
        let numbers: Vec<u32> = report.rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(report.rows[1].note.as_deref(), Some("note 2"));
        assert_eq!(report.rows[1].progress, Some(1));
        assert_eq!(report.verdict.text, "Lock opened");
        assert_eq!(report.verdict.tone, Tone::Positive);
        assert_eq!(report.fact("Progress"), Some("2/2"));
        assert_eq!(report.fact("Attempts"), Some("3"));
        assert_eq!(report.fact("Time"), Some("3 min"));
    }

    #[test]
    fn bonus_breakdown_and_modifier_signs() {
        let report = render_simulation(&result(SimulationOutcome::Opened, vec![]), &ctx());
        assert_eq!(report.fact("Total modifier"), Some("+5"));
        assert_eq!(
            report.fact("Bonuses"),
            Some("Item +1, Status +0, Circumstance +2, Untyped -1")
        );
        assert_eq!(report.fact("Dice"), Some("Silent"));
    }

    #[test]
    fn verdicts_match_outcomes() {
        let cases = [
            (SimulationOutcome::CriticalFailureAbort, Tone::Danger),
            (SimulationOutcome::AttemptLimitAbort, Tone::Warning),
            (SimulationOutcome::Incomplete, Tone::Neutral),
        ];
        for (outcome, tone) in cases {
            let report = render_simulation(&result(outcome, vec![]), &ctx());
            assert_eq!(report.verdict.text, outcome.to_string());
            assert_eq!(report.verdict.tone, tone);
        }
    }

    #[test]
    fn critical_abort_has_footnote() {
        let r = result(
            SimulationOutcome::CriticalFailureAbort,
            vec![attempt(1, 1, Degree::CriticalFailure, 0)],
        );
        let report = render_simulation(&r, &ctx());
        assert_eq!(
            report.footnote.as_deref(),
            Some("Tools damaged, spare picks needed.")
        );
        let report = render_simulation(&result(SimulationOutcome::Opened, vec![]), &ctx());
        assert!(report.footnote.is_none());
    }

    #[test]
    fn whisper_audience() {
        let mut c = ctx();
        c.whisper = true;
        let report = render_simulation(&result(SimulationOutcome::Opened, vec![]), &c);
        assert_eq!(report.audience, Audience::Whisper);
    }

    #[test]
    fn request_attachment_fact() {
        let mut c = ctx();
        c.request = Some(Ok(RequestCheckSpec::parse("@Check[type:thievery|dc:40]").unwrap()));
        let report = render_simulation(&result(SimulationOutcome::Opened, vec![]), &c);
        assert_eq!(report.fact("Request roll"), Some("@Check[type:thievery|dc:40]"));

        c.request = Some(Err("missing dc".to_string()));
        let report = render_simulation(&result(SimulationOutcome::Opened, vec![]), &c);
        assert_eq!(
            report.fact("Request roll"),
            Some("invalid or missing @Check tag (missing dc)")
        );
    }

    #[test]
    fn request_report() {
        let rolls = vec![
            RequestRoll {
                roll_number: 1,
                die_face: 9,
                total: 17,
                degree: Degree::Failure,
            },
            RequestRoll {
                roll_number: 2,
                die_face: 16,
                total: 24,
                degree: Degree::Success,
            },
        ];
        let result = RequestRollResult {
            rolls,
            stop_reason: StopReason::Success,
        };
        let ctx = RequestContext {
            actor_name: "Bram".to_string(),
            spec: RequestCheckSpec::parse("@Check[type:thievery|dc:20]").unwrap(),
            modifier: 8,
        };
        let report = render_request(&result, &ctx);
        assert_eq!(report.title, "Request Roll: Bram");
        assert_eq!(report.fact("Check"), Some("Thievery vs. DC 20"));
        assert_eq!(report.fact("Modifier"), Some("+8"));
        assert_eq!(report.fact("Stop"), Some("Success"));
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.progress.is_none()));
        assert!(!report.has_progress_columns());
        assert_eq!(report.verdict.tone, Tone::Positive);
    }

    #[test]
    fn exhausted_request_verdict() {
        let result = RequestRollResult {
            rolls: Vec::new(),
            stop_reason: StopReason::Exhausted,
        };
        let ctx = RequestContext {
            actor_name: "Bram".to_string(),
            spec: RequestCheckSpec::parse("@Check[dc:20]").unwrap(),
            modifier: -1,
        };
        let report = render_request(&result, &ctx);
        assert_eq!(report.verdict.text, "No decisive result after 200 rolls");
        assert_eq!(report.fact("Modifier"), Some("-1"));
    }

    #[test]
    fn breakage_notice_goes_to_gms() {
        let report = tool_breakage_notice("Mira");
        assert_eq!(report.audience, Audience::GameMasters);
        assert!(report.verdict.text.starts_with("Mira critically failed"));
    }

    #[test]
    fn signed_format() {
        assert_eq!(format_signed(0), "+0");
        assert_eq!(format_signed(7), "+7");
        assert_eq!(format_signed(-3), "-3");
    }
}
