//! Random face sources for d20 checks.
//!
//! The engine never rolls on its own. Every check draws its faces from an
//! injected [`FaceSource`], so the same loop runs against silent pseudo-random
//! rolls, a host's visible dice tray, or a scripted sequence in tests.

pub mod host;
pub mod scripted;

pub use host::HostDice;
pub use scripted::ScriptedFaces;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on the check die.
pub const D20: u32 = 20;

/// A source of d20 faces.
pub trait FaceSource {
    /// Draw one face in `1..=20`.
    fn roll_d20(&mut self) -> u32;
}

impl<T: FaceSource + ?Sized> FaceSource for &mut T {
    fn roll_d20(&mut self) -> u32 {
        (**self).roll_d20()
    }
}

impl<T: FaceSource + ?Sized> FaceSource for Box<T> {
    fn roll_d20(&mut self) -> u32 {
        (**self).roll_d20()
    }
}

/// Silent pseudo-random d20 rolls that never touch the host's dice tray.
#[derive(Debug, Clone)]
pub struct SilentDice {
    rng: StdRng,
}

impl SilentDice {
    /// Create a reproducible roller from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a roller seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl FaceSource for SilentDice {
    fn roll_d20(&mut self) -> u32 {
        self.rng.random_range(1..=D20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_faces_in_range() {
        let mut dice = SilentDice::new(42);
        for _ in 0..500 {
            let face = dice.roll_d20();
            assert!((1..=D20).contains(&face));
        }
    }

    #[test]
    fn silent_deterministic_with_seed() {
        let mut a = SilentDice::new(7);
        let mut b = SilentDice::new(7);
        for _ in 0..20 {
            assert_eq!(a.roll_d20(), b.roll_d20());
        }
    }

    #[test]
    fn silent_covers_both_naturals() {
        let mut dice = SilentDice::new(1);
        let faces: Vec<u32> = (0..2000).map(|_| dice.roll_d20()).collect();
        assert!(faces.contains(&1));
        assert!(faces.contains(&20));
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut dice = ScriptedFaces::new([4, 9]).unwrap();
        let mut borrowed: &mut dyn FaceSource = &mut dice;
        assert_eq!(borrowed.roll_d20(), 4);
        assert_eq!((&mut borrowed).roll_d20(), 9);
    }
}
