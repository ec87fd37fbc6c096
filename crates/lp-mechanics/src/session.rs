//! One player-facing lock-picking action, end to end.
//!
//! [`pick_a_lock`] takes a finished snapshot of the player's choices, resolves
//! the actor's modifier, stacks the bonuses, runs the attempt loop and
//! publishes the report. [`request_roll`] is the separate, later action bound
//! to an inline check: it always rolls silently and shares nothing with the
//! run that attached it.

use tracing::{debug, info};

use crate::actor::{ModifierSource, base_modifier};
use crate::dice::{FaceSource, SilentDice};
use crate::error::{LockError, LockResult};
use crate::lock::{self, LockConfiguration, LockPreset, SimulationOutcome, SimulationResult};
use crate::modifier::{AggregatedModifier, Modifier, aggregate};
use crate::report::{
    Report, ReportSink, RequestContext, SimulationContext, render_request, render_simulation,
    tool_breakage_notice,
};
use crate::request::{self, RequestCheckSpec, RequestRollResult};
use crate::skill::Skill;

/// The player's choices for one lock-picking run.
#[derive(Debug, Clone)]
pub struct PickRequest {
    /// Skill used for the checks.
    pub skill: Skill,
    /// Modifier entered by hand; only used with [`Skill::Custom`].
    pub manual_modifier: Option<i32>,
    /// Extra typed bonuses and penalties.
    pub bonuses: Vec<Modifier>,
    /// Lock and run parameters.
    pub lock: LockConfiguration,
    /// Inline check to attach for a later request roll.
    pub request_tag: Option<String>,
}

impl PickRequest {
    /// A Thievery run against a preset lock.
    pub fn new(preset: LockPreset) -> Self {
        Self {
            skill: Skill::Thievery,
            manual_modifier: None,
            bonuses: Vec::new(),
            lock: LockConfiguration::from_preset(preset),
            request_tag: None,
        }
    }

    /// Use a different skill.
    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    /// Set the hand-entered modifier for [`Skill::Custom`].
    pub fn with_manual_modifier(mut self, modifier: i32) -> Self {
        self.manual_modifier = Some(modifier);
        self
    }

    /// Add a typed bonus or penalty.
    pub fn with_bonus(mut self, bonus: Modifier) -> Self {
        self.bonuses.push(bonus);
        self
    }

    /// Replace the lock configuration.
    pub fn with_lock(mut self, lock: LockConfiguration) -> Self {
        self.lock = lock;
        self
    }

    /// Attach an inline check for a later request roll.
    pub fn with_request_tag(mut self, tag: impl Into<String>) -> Self {
        self.request_tag = Some(tag.into());
        self
    }
}

/// Everything produced by one lock-picking run.
#[derive(Debug, Clone)]
pub struct PickOutcome {
    /// The attempt-loop trace.
    pub result: SimulationResult,
    /// Base modifier plus stacked bonuses.
    pub total_modifier: i32,
    /// The stacked bonuses.
    pub bonuses: AggregatedModifier,
    /// The attached inline check, if it parsed.
    pub request: Option<RequestCheckSpec>,
    /// The published report.
    pub report: Report,
    /// Notice for the game masters when the run ended in broken tools.
    pub gm_notice: Option<Report>,
}

/// Run a lock-picking action and publish its report once.
///
/// Fails before rolling if no actor is selected, the actor has no modifier
/// for the skill, or the lock cannot be progressed at all. An invalid request
/// tag does not fail the run; it is reported in the published report.
pub fn pick_a_lock<D>(
    actor: Option<&dyn ModifierSource>,
    request: &PickRequest,
    dice: &mut D,
    sink: &mut dyn ReportSink,
) -> LockResult<PickOutcome>
where
    D: FaceSource + ?Sized,
{
    let actor = actor.ok_or(LockError::MissingActor)?;
    let base = match request.skill {
        Skill::Custom => request
            .manual_modifier
            .ok_or_else(|| LockError::MissingModifierSource(Skill::Custom.slug().to_string()))?,
        skill => base_modifier(Some(actor), skill.slug())?,
    };

    let bonuses = aggregate(&request.bonuses);
    let total_modifier = base.saturating_add(bonuses.total);
    debug!(base, bonus = bonuses.total, total_modifier, "resolved check modifier");

    let result = lock::run(total_modifier, &request.lock, dice)?;

    let attachment = request.request_tag.as_deref().map(|tag| {
        RequestCheckSpec::parse(tag).map_err(|e| match e {
            LockError::InvalidRequestCheckSpec(reason) => reason,
            other => other.to_string(),
        })
    });

    let ctx = SimulationContext {
        actor_name: actor.actor_name().to_string(),
        skill: request.skill.label().to_string(),
        total_modifier,
        bonuses,
        lock: request.lock.preset.to_string(),
        dc: request.lock.difficulty_class,
        silent: request.lock.silent_mode,
        whisper: request.lock.whisper,
        request: attachment.clone(),
    };
    let report = render_simulation(&result, &ctx);
    sink.publish(&report);

    let gm_notice = (result.outcome == SimulationOutcome::CriticalFailureAbort)
        .then(|| tool_breakage_notice(actor.actor_name()));

    info!(
        actor = actor.actor_name(),
        outcome = ?result.outcome,
        "published lock-picking report"
    );

    Ok(PickOutcome {
        result,
        total_modifier,
        bonuses,
        request: attachment.and_then(Result::ok),
        report,
        gm_notice,
    })
}

/// Resolve a request roll for an inline check and publish its report once.
///
/// Takes [`SilentDice`] by value: request rolls never go through the host's
/// dice tray, whatever the lock-picking run used.
pub fn request_roll(
    actor: Option<&dyn ModifierSource>,
    spec: &RequestCheckSpec,
    mut dice: SilentDice,
    sink: &mut dyn ReportSink,
) -> LockResult<RequestRollResult> {
    let actor = actor.ok_or(LockError::MissingActor)?;
    let modifier = base_modifier(Some(actor), &spec.statistic_type)?;

    let result = request::resolve(modifier, spec.difficulty_class, &mut dice);
    let ctx = RequestContext {
        actor_name: actor.actor_name().to_string(),
        spec: spec.clone(),
        modifier,
    };
    sink.publish(&render_request(&result, &ctx));

    info!(
        actor = actor.actor_name(),
        check = %spec.statistic_type,
        dc = spec.difficulty_class,
        stop = ?result.stop_reason,
        rolls = result.rolls.len(),
        "published request-roll report"
    );
    Ok(result)
}

/// Parse an inline check tag and resolve it.
///
/// An invalid tag is reported as [`LockError::InvalidRequestCheckSpec`] and
/// nothing is rolled or published.
pub fn request_roll_from_tag(
    actor: Option<&dyn ModifierSource>,
    tag: &str,
    dice: SilentDice,
    sink: &mut dyn ReportSink,
) -> LockResult<RequestRollResult> {
    let spec = RequestCheckSpec::parse(tag)?;
    request_roll(actor, &spec, dice, sink)
}
