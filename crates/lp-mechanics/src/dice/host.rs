//! Host-driven ("visible") dice.

use tracing::warn;

use super::{D20, FaceSource, SilentDice};

/// Rolls through a host's dice tray, falling back to silent rolls.
///
/// The host callback returns `None` (or an out-of-range face) when its own
/// roll machinery fails to produce a usable d20 result. In that case the face
/// is drawn from the fallback roller so the check can still proceed.
pub struct HostDice<F> {
    host: F,
    fallback: SilentDice,
}

impl<F> HostDice<F>
where
    F: FnMut() -> Option<u32>,
{
    /// Wrap a host roller with a silent fallback.
    pub fn new(host: F, fallback: SilentDice) -> Self {
        Self { host, fallback }
    }
}

impl<F> FaceSource for HostDice<F>
where
    F: FnMut() -> Option<u32>,
{
    fn roll_d20(&mut self) -> u32 {
        match (self.host)() {
            Some(face) if (1..=D20).contains(&face) => face,
            other => {
                warn!(?other, "host dice produced no usable d20 face, rolling silently");
                self.fallback.roll_d20()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_host_face() {
        let mut dice = HostDice::new(|| Some(17), SilentDice::new(1));
        assert_eq!(dice.roll_d20(), 17);
    }

    #[test]
    fn falls_back_when_host_fails() {
        let mut dice = HostDice::new(|| None, SilentDice::new(1));
        let face = dice.roll_d20();
        assert!((1..=D20).contains(&face));
    }

    #[test]
    fn falls_back_on_out_of_range_face() {
        let mut dice = HostDice::new(|| Some(0), SilentDice::new(3));
        let face = dice.roll_d20();
        assert!((1..=D20).contains(&face));

        let mut dice = HostDice::new(|| Some(21), SilentDice::new(3));
        let face = dice.roll_d20();
        assert!((1..=D20).contains(&face));
    }
}
