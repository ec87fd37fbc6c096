//! Skills offered for lock picking.

use serde::{Deserialize, Serialize};

/// A skill that can be used to pick a lock.
///
/// Thievery is the rulebook skill; the others cover magical locks and
/// archetype abilities. `Custom` means the modifier is entered by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    /// Thievery (default).
    #[default]
    Thievery,
    /// Occultism.
    Occultism,
    /// Arcana.
    Arcana,
    /// Religion.
    Religion,
    /// Society.
    Society,
    /// Crafting.
    Crafting,
    /// A manually entered modifier.
    Custom,
}

impl Skill {
    /// All skills, `Custom` last.
    pub fn all() -> &'static [Self] {
        &[
            Self::Thievery,
            Self::Occultism,
            Self::Arcana,
            Self::Religion,
            Self::Society,
            Self::Crafting,
            Self::Custom,
        ]
    }

    /// Statistic key used to look the modifier up on an actor.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Thievery => "thievery",
            Self::Occultism => "occultism",
            Self::Arcana => "arcana",
            Self::Religion => "religion",
            Self::Society => "society",
            Self::Crafting => "crafting",
            Self::Custom => "custom",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Thievery => "Thievery",
            Self::Occultism => "Occultism",
            Self::Arcana => "Arcana",
            Self::Religion => "Religion",
            Self::Society => "Society",
            Self::Crafting => "Crafting",
            Self::Custom => "Custom",
        }
    }

    /// Parse a slug or label, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::all().iter().copied().find(|skill| skill.slug() == key)
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skills() {
        assert_eq!(Skill::parse("Thievery"), Some(Skill::Thievery));
        assert_eq!(Skill::parse(" crafting "), Some(Skill::Crafting));
        assert_eq!(Skill::parse("custom"), Some(Skill::Custom));
        assert_eq!(Skill::parse("athletics"), None);
    }

    #[test]
    fn default_is_thievery() {
        assert_eq!(Skill::default(), Skill::Thievery);
        assert_eq!(Skill::default().slug(), "thievery");
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Skill::Occultism.to_string(), "Occultism");
    }
}
