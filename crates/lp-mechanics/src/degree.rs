//! Degrees of success for d20 checks.
//!
//! A check total is compared to a DC: beating it by 10 or more is a critical
//! success, meeting it a success, missing by 10 or more a critical failure,
//! anything else a failure. A natural 20 then improves the result one step and
//! a natural 1 worsens it one step.

use serde::{Deserialize, Serialize};

/// One of the four outcome tiers of a check.
///
/// Serialized as its numeric tier, 0 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Degree {
    /// Missed the DC by 10 or more (index 0).
    CriticalFailure,
    /// Below the DC (index 1).
    Failure,
    /// Met the DC (index 2).
    Success,
    /// Beat the DC by 10 or more (index 3).
    CriticalSuccess,
}

impl Degree {
    /// Numeric tier, 0 (critical failure) through 3 (critical success).
    pub fn index(self) -> u8 {
        match self {
            Self::CriticalFailure => 0,
            Self::Failure => 1,
            Self::Success => 2,
            Self::CriticalSuccess => 3,
        }
    }

    /// One step better, capped at critical success.
    pub fn upgrade(self) -> Self {
        match self {
            Self::CriticalFailure => Self::Failure,
            Self::Failure => Self::Success,
            Self::Success | Self::CriticalSuccess => Self::CriticalSuccess,
        }
    }

    /// One step worse, floored at critical failure.
    pub fn downgrade(self) -> Self {
        match self {
            Self::CriticalSuccess => Self::Success,
            Self::Success => Self::Failure,
            Self::Failure | Self::CriticalFailure => Self::CriticalFailure,
        }
    }

    /// True for success and critical success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::CriticalSuccess)
    }

    /// Compact label for transcript tables.
    pub fn short_label(self) -> &'static str {
        match self {
            Self::CriticalFailure => "Crit Fail",
            Self::Failure => "Fail",
            Self::Success => "Success",
            Self::CriticalSuccess => "Crit Success",
        }
    }
}

impl From<Degree> for u8 {
    fn from(degree: Degree) -> Self {
        degree.index()
    }
}

impl TryFrom<u8> for Degree {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::CriticalFailure),
            1 => Ok(Self::Failure),
            2 => Ok(Self::Success),
            3 => Ok(Self::CriticalSuccess),
            other => Err(format!("degree index out of range: {other}")),
        }
    }
}

impl std::fmt::Display for Degree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalFailure => write!(f, "Critical Failure"),
            Self::Failure => write!(f, "Failure"),
            Self::Success => write!(f, "Success"),
            Self::CriticalSuccess => write!(f, "Critical Success"),
        }
    }
}

/// Determine the degree of success of a check.
///
/// The natural 20 / natural 1 shift is applied after the base comparison.
pub fn evaluate(total: i32, dc: i32, die_face: u32) -> Degree {
    let base = if total >= dc.saturating_add(10) {
        Degree::CriticalSuccess
    } else if total >= dc {
        Degree::Success
    } else if total <= dc.saturating_sub(10) {
        Degree::CriticalFailure
    } else {
        Degree::Failure
    };

    match die_face {
        20 => base.upgrade(),
        1 => base.downgrade(),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_bands() {
        assert_eq!(evaluate(30, 20, 10), Degree::CriticalSuccess);
        assert_eq!(evaluate(29, 20, 10), Degree::Success);
        assert_eq!(evaluate(20, 20, 10), Degree::Success);
        assert_eq!(evaluate(19, 20, 10), Degree::Failure);
        assert_eq!(evaluate(11, 20, 10), Degree::Failure);
        assert_eq!(evaluate(10, 20, 10), Degree::CriticalFailure);
        assert_eq!(evaluate(-5, 20, 10), Degree::CriticalFailure);
    }

    #[test]
    fn natural_twenty_shifts_up() {
        // 19 vs DC 20 is a failure; the natural 20 makes it a success.
        assert_eq!(evaluate(19, 20, 19), Degree::Failure);
        assert_eq!(evaluate(19, 20, 20), Degree::Success);
        assert_eq!(evaluate(10, 20, 20), Degree::Failure);
        assert_eq!(evaluate(35, 20, 20), Degree::CriticalSuccess);
    }

    #[test]
    fn natural_one_shifts_down() {
        assert_eq!(evaluate(35, 20, 1), Degree::Success);
        assert_eq!(evaluate(20, 20, 1), Degree::Failure);
        assert_eq!(evaluate(15, 20, 1), Degree::CriticalFailure);
        assert_eq!(evaluate(0, 20, 1), Degree::CriticalFailure);
    }

    #[test]
    fn serializes_as_numeric_tier() {
        assert_eq!(serde_json::to_string(&Degree::CriticalFailure).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Degree::Success).unwrap(), "2");
        let degree: Degree = serde_json::from_str("3").unwrap();
        assert_eq!(degree, Degree::CriticalSuccess);
        assert!(serde_json::from_str::<Degree>("4").is_err());
        assert!(serde_json::from_str::<Degree>("\"Success\"").is_err());
    }

    #[test]
    fn upgrade_and_downgrade_saturate() {
        assert_eq!(Degree::CriticalSuccess.upgrade(), Degree::CriticalSuccess);
        assert_eq!(Degree::CriticalFailure.downgrade(), Degree::CriticalFailure);
        assert_eq!(Degree::Failure.upgrade(), Degree::Success);
        assert_eq!(Degree::Success.downgrade(), Degree::Failure);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Degree::CriticalSuccess.to_string(), "Critical Success");
        assert_eq!(Degree::CriticalFailure.short_label(), "Crit Fail");
        assert!(Degree::Success.is_success());
        assert!(!Degree::Failure.is_success());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn monotonic_in_total(face in 3u32..=18, dc in -10i32..=60, a in -40i32..=80, b in -40i32..=80) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(evaluate(lo, dc, face) <= evaluate(hi, dc, face));
            }

            #[test]
            fn natural_twenty_is_one_step_above_plain(dc in -10i32..=60, total in -40i32..=80) {
                prop_assert_eq!(evaluate(total, dc, 20), evaluate(total, dc, 19).upgrade());
            }

            #[test]
            fn natural_one_is_one_step_below_plain(dc in -10i32..=60, total in -40i32..=80) {
                prop_assert_eq!(evaluate(total, dc, 1), evaluate(total, dc, 2).downgrade());
            }
        }
    }
}
