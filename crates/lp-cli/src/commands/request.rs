use std::path::Path;

use lp_mechanics::ModifierSource;
use tracing::debug;

use crate::sink::TerminalSink;

pub fn run(tag: &str, actor: &Path, seed: Option<u64>, json: bool) -> Result<(), String> {
    let actor = super::load_actor(actor)?;
    let mut sink = TerminalSink::new(json);

    debug!(tag, actor = actor.actor_name(), "request roll");
    lp_mechanics::request_roll_from_tag(
        Some(&actor as &dyn ModifierSource),
        tag,
        super::silent_dice(seed),
        &mut sink,
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
