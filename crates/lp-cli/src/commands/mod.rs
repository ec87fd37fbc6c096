pub mod pick;
pub mod presets;
pub mod request;

use std::path::Path;

use lp_mechanics::SilentDice;

use crate::actor::SheetActor;

/// Load an actor's character sheet, with the path in the error message.
fn load_actor(path: &Path) -> Result<SheetActor, String> {
    SheetActor::load(path).map_err(|e| format!("failed to load actor '{}': {e}", path.display()))
}

/// Silent dice from a seed, or from the OS when no seed is given.
fn silent_dice(seed: Option<u64>) -> SilentDice {
    seed.map_or_else(SilentDice::from_os_rng, SilentDice::new)
}
