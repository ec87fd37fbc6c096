use std::fs;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use lp_mechanics::{
    FaceSource, HostDice, LockConfiguration, LockPreset, Modifier, ModifierSource, PickRequest,
    ReportSink, RequestCheckSpec, ScriptedFaces, Skill, SilentDice,
};

use crate::actor::SheetActor;
use crate::sink::TerminalSink;

#[derive(Args)]
pub struct PickArgs {
    /// Character sheet (JSON) of the actor picking the lock
    #[arg(short, long)]
    actor: PathBuf,

    /// Skill used for the checks (thievery, occultism, arcana, religion, society, crafting, custom)
    #[arg(short, long, default_value = "thievery")]
    skill: String,

    /// Hand-entered modifier, required with --skill custom
    #[arg(long, allow_hyphen_values = true)]
    modifier: Option<i32>,

    /// Extra bonus as VALUE:CATEGORY (item, status, circumstance, untyped); repeatable
    #[arg(short, long = "bonus", value_name = "VALUE:CATEGORY", allow_hyphen_values = true)]
    bonuses: Vec<String>,

    /// Lock quality: poor, simple, average, good, superior or custom
    #[arg(short, long, conflicts_with = "config")]
    lock: Option<String>,

    /// Difficulty class of a custom lock
    #[arg(long)]
    dc: Option<i32>,

    /// Required successes of a custom lock
    #[arg(long, allow_hyphen_values = true)]
    successes: Option<i64>,

    /// In-game minutes per attempt
    #[arg(long, allow_hyphen_values = true)]
    minutes: Option<i64>,

    /// Attempt cap (0 picks one from the required successes)
    #[arg(long, allow_hyphen_values = true)]
    max_attempts: Option<i64>,

    /// Keep going after a critical failure breaks the tools
    #[arg(long)]
    keep_going: bool,

    /// The Sneaky Key grants +1 progress on the first success
    #[arg(long)]
    sneaky_key: bool,

    /// Roll through the visible dice tray instead of silently
    #[arg(long)]
    visible: bool,

    /// Whisper the report to the roller only
    #[arg(long)]
    whisper: bool,

    /// Lock configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inline check to attach, e.g. "@Check[type:thievery|dc:40]"
    #[arg(long)]
    request: Option<String>,

    /// Resolve the attached inline check right after the run
    #[arg(long, requires = "request")]
    roll_request: bool,

    /// RNG seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed d20 faces to roll, comma-separated and repeated as needed
    #[arg(long)]
    faces: Option<String>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: &PickArgs) -> Result<(), String> {
    let actor = super::load_actor(&args.actor)?;
    let request = build_request(args)?;
    let mut dice = build_dice(args, &request.lock)?;
    let mut sink = TerminalSink::new(args.json);

    let outcome = lp_mechanics::pick_a_lock(
        Some(&actor as &dyn ModifierSource),
        &request,
        dice.as_mut(),
        &mut sink,
    )
    .map_err(|e| e.to_string())?;

    if let Some(notice) = &outcome.gm_notice {
        sink.publish(notice);
    }

    if args.roll_request {
        roll_attached(args, &actor, outcome.request.as_ref(), &mut sink)?;
    }
    Ok(())
}

fn build_request(args: &PickArgs) -> Result<PickRequest, String> {
    let skill = Skill::parse(&args.skill).ok_or_else(|| {
        let known: Vec<&str> = Skill::all().iter().map(|s| s.slug()).collect();
        format!("unknown skill '{}' (expected one of: {})", args.skill, known.join(", "))
    })?;
    if skill == Skill::Custom && args.modifier.is_none() {
        return Err("--skill custom needs --modifier".to_string());
    }

    let lock = build_lock(args)?;
    let mut request = PickRequest::new(lock.preset)
        .with_skill(skill)
        .with_lock(lock);
    if let Some(modifier) = args.modifier {
        request = request.with_manual_modifier(modifier);
    }
    for pair in &args.bonuses {
        let bonus = Modifier::parse_pair(pair)
            .ok_or_else(|| format!("invalid bonus '{pair}' (expected VALUE:CATEGORY)"))?;
        request = request.with_bonus(bonus);
    }
    if let Some(tag) = &args.request {
        request = request.with_request_tag(tag.clone());
    }
    Ok(request)
}

fn build_lock(args: &PickArgs) -> Result<LockConfiguration, String> {
    let mut lock = match (&args.config, &args.lock) {
        (Some(path), _) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("failed to read '{}': {e}", path.display()))?;
            LockConfiguration::from_json(&json).map_err(|e| e.to_string())?
        }
        (None, Some(name)) => {
            let preset = LockPreset::parse(name)
                .ok_or_else(|| format!("unknown lock preset: {name}"))?;
            LockConfiguration::from_preset(preset)
        }
        (None, None) => LockConfiguration::default(),
    };

    if (args.dc.is_some() || args.successes.is_some()) && !lock.preset.is_custom() {
        return Err("--dc and --successes only apply to a custom lock".to_string());
    }
    if let Some(dc) = args.dc {
        lock = lock.with_dc(dc);
    }
    if let Some(successes) = args.successes {
        lock = lock.with_required_successes(successes);
    }
    if let Some(minutes) = args.minutes {
        lock = lock.with_minutes_per_attempt(minutes);
    }
    if let Some(attempts) = args.max_attempts {
        lock = lock.with_max_attempts(attempts);
    }
    if args.keep_going {
        lock = lock.with_stop_on_critical_failure(false);
    }
    if args.sneaky_key {
        lock = lock.with_sneaky_key(true);
    }
    if args.visible {
        lock = lock.with_silent_mode(false);
    }
    if args.whisper {
        lock = lock.with_whisper(true);
    }
    Ok(lock)
}

fn build_dice(args: &PickArgs, lock: &LockConfiguration) -> Result<Box<dyn FaceSource>, String> {
    if let Some(list) = &args.faces {
        let faces = ScriptedFaces::parse(list)
            .ok_or_else(|| format!("invalid --faces '{list}' (expected numbers from 1 to 20)"))?;
        return Ok(Box::new(faces));
    }
    if lock.silent_mode {
        return Ok(Box::new(super::silent_dice(args.seed)));
    }

    let mut tray = super::silent_dice(args.seed);
    let fallback = args
        .seed
        .map_or_else(SilentDice::from_os_rng, |seed| SilentDice::new(seed.wrapping_add(1)));
    let host = move || {
        let face = tray.roll_d20();
        eprintln!("{} d20 = {}", "rolling".dimmed(), face.to_string().bold());
        Some(face)
    };
    Ok(Box::new(HostDice::new(host, fallback)))
}

fn roll_attached(
    args: &PickArgs,
    actor: &SheetActor,
    spec: Option<&RequestCheckSpec>,
    sink: &mut TerminalSink,
) -> Result<(), String> {
    let spec = spec.ok_or("no valid inline check attached to roll")?;
    lp_mechanics::request_roll(
        Some(actor as &dyn ModifierSource),
        spec,
        super::silent_dice(args.seed.map(|s| s.wrapping_add(2))),
        sink,
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
