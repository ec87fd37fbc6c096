//! Standard lock qualities.
//!
//! Each quality fixes the DC and the number of successes needed. `Custom`
//! leaves both to the caller.

use serde::{Deserialize, Serialize};

/// A lock quality from the core rulebook, or a custom lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockPreset {
    /// Poor lock (level 0): DC 15, 2 successes.
    Poor,
    /// Simple lock (level 1): DC 20, 3 successes.
    Simple,
    /// Average lock (level 3): DC 25, 4 successes.
    Average,
    /// Good lock (level 9): DC 30, 5 successes.
    Good,
    /// Superior lock (level 17): DC 40, 6 successes.
    Superior,
    /// Own DC and successes (defaults to DC 20, 3 successes).
    Custom,
}

impl LockPreset {
    /// All presets in ascending quality, `Custom` last.
    pub fn all() -> &'static [Self] {
        &[
            Self::Poor,
            Self::Simple,
            Self::Average,
            Self::Good,
            Self::Superior,
            Self::Custom,
        ]
    }

    /// Parse a preset from a name such as "good" or "Superior".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "poor" => Some(Self::Poor),
            "simple" => Some(Self::Simple),
            "average" => Some(Self::Average),
            "good" => Some(Self::Good),
            "superior" => Some(Self::Superior),
            "custom" | "own" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Difficulty class of the lock.
    pub fn dc(self) -> i32 {
        match self {
            Self::Poor => 15,
            Self::Simple | Self::Custom => 20,
            Self::Average => 25,
            Self::Good => 30,
            Self::Superior => 40,
        }
    }

    /// Successes needed to open the lock.
    pub fn required_successes(self) -> u32 {
        match self {
            Self::Poor => 2,
            Self::Simple | Self::Custom => 3,
            Self::Average => 4,
            Self::Good => 5,
            Self::Superior => 6,
        }
    }

    /// Item level of the lock, if it is a standard one.
    pub fn level(self) -> Option<u32> {
        match self {
            Self::Poor => Some(0),
            Self::Simple => Some(1),
            Self::Average => Some(3),
            Self::Good => Some(9),
            Self::Superior => Some(17),
            Self::Custom => None,
        }
    }

    /// Whether DC and successes are taken from the caller.
    pub fn is_custom(self) -> bool {
        self == Self::Custom
    }
}

impl std::fmt::Display for LockPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Poor => "Poor",
            Self::Simple => "Simple",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Superior => "Superior",
            Self::Custom => return write!(f, "Custom"),
        };
        match self.level() {
            Some(level) => write!(f, "{name} (level {level})"),
            None => write!(f, "{name}"),
        }
    }
}
