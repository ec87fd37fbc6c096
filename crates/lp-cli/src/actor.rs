//! Character sheets loaded from JSON.
//!
//! Accepts a flat sheet (`{"name", "skills", "abilities"}`) or the same maps
//! nested under `system`, the way exported sheets from a virtual tabletop
//! look. A statistic entry may be a bare number or an object carrying the
//! modifier under `check.mod`, `totalModifier`, `mod` or `value`, looked up
//! in that order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lp_mechanics::ModifierSource;
use serde::Deserialize;
use tracing::debug;

/// Three-letter short forms of the skills, as sheets often key them.
const SKILL_ALIASES: &[(&str, &str)] = &[
    ("acrobatics", "acr"),
    ("arcana", "arc"),
    ("athletics", "ath"),
    ("crafting", "cra"),
    ("deception", "dec"),
    ("diplomacy", "dip"),
    ("intimidation", "itm"),
    ("medicine", "med"),
    ("nature", "nat"),
    ("occultism", "occ"),
    ("performance", "prf"),
    ("religion", "rel"),
    ("society", "soc"),
    ("stealth", "ste"),
    ("survival", "sur"),
    ("thievery", "thi"),
    ("perception", "per"),
];

/// Key ability of each skill, used when the sheet has no skill entry.
const KEY_ABILITIES: &[(&str, &str)] = &[
    ("thievery", "dex"),
    ("stealth", "dex"),
    ("acrobatics", "dex"),
    ("athletics", "str"),
    ("religion", "wis"),
    ("medicine", "wis"),
    ("survival", "wis"),
    ("perception", "wis"),
    ("nature", "wis"),
    ("arcana", "int"),
    ("occultism", "int"),
    ("crafting", "int"),
    ("society", "int"),
    ("deception", "cha"),
    ("diplomacy", "cha"),
    ("intimidation", "cha"),
    ("performance", "cha"),
];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatEntry {
    Flat(i32),
    Check { check: CheckEntry },
    Total {
        #[serde(rename = "totalModifier")]
        total_modifier: i32,
    },
    Mod {
        #[serde(rename = "mod")]
        modifier: i32,
    },
    Value { value: i32 },
}

#[derive(Debug, Deserialize)]
struct CheckEntry {
    #[serde(rename = "mod")]
    modifier: i32,
}

impl StatEntry {
    fn modifier(&self) -> i32 {
        match self {
            Self::Flat(m) => *m,
            Self::Check { check } => check.modifier,
            Self::Total { total_modifier } => *total_modifier,
            Self::Mod { modifier } => *modifier,
            Self::Value { value } => *value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatBlock {
    #[serde(default)]
    skills: HashMap<String, StatEntry>,
    #[serde(default)]
    abilities: HashMap<String, StatEntry>,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    name: String,
    #[serde(flatten)]
    stats: StatBlock,
    #[serde(default)]
    system: Option<StatBlock>,
}

/// An actor read from a JSON character sheet.
#[derive(Debug)]
pub struct SheetActor {
    name: String,
    skills: HashMap<String, i32>,
    abilities: HashMap<String, i32>,
}

impl SheetActor {
    /// Read and parse a sheet file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_json(&json)
    }

    /// Parse a sheet document. Entries under `system` win over top-level ones.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let raw: RawSheet = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let mut skills = flatten(raw.stats.skills);
        let mut abilities = flatten(raw.stats.abilities);
        if let Some(system) = raw.system {
            skills.extend(flatten(system.skills));
            abilities.extend(flatten(system.abilities));
        }
        Ok(Self {
            name: raw.name,
            skills,
            abilities,
        })
    }

    fn skill(&self, slug: &str) -> Option<i32> {
        if let Some(m) = self.skills.get(slug) {
            return Some(*m);
        }
        SKILL_ALIASES
            .iter()
            .find(|(long, _)| *long == slug)
            .and_then(|(_, short)| self.skills.get(*short).copied())
    }

    fn key_ability(&self, slug: &str) -> Option<i32> {
        KEY_ABILITIES
            .iter()
            .find(|(skill, _)| *skill == slug)
            .and_then(|(_, ability)| self.abilities.get(*ability).copied())
    }
}

fn flatten(entries: HashMap<String, StatEntry>) -> HashMap<String, i32> {
    entries
        .into_iter()
        .map(|(key, entry)| (key.to_lowercase(), entry.modifier()))
        .collect()
}

impl ModifierSource for SheetActor {
    fn actor_name(&self) -> &str {
        &self.name
    }

    fn statistic_modifier(&self, statistic: &str) -> Option<i32> {
        let slug = statistic.trim().to_lowercase();
        let found = self.skill(&slug).or_else(|| self.key_ability(&slug));
        if found.is_none() {
            debug!(actor = %self.name, statistic = %slug, "no modifier on sheet");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_flat_numbers() {
        let actor = SheetActor::from_json(r#"{"name":"Mira","skills":{"thievery":9}}"#).unwrap();
        assert_eq!(actor.actor_name(), "Mira");
        assert_eq!(actor.statistic_modifier("thievery"), Some(9));
        assert_eq!(actor.statistic_modifier("Thievery"), Some(9));
    }

    #[test]
    fn entry_shapes_in_lookup_order() {
        let actor = SheetActor::from_json(
            r#"{"name":"Mira","skills":{
                "thievery":{"check":{"mod":11},"totalModifier":3},
                "arcana":{"totalModifier":6,"mod":1},
                "society":{"mod":4},
                "crafting":{"value":2}
            }}"#,
        )
        .unwrap();
        assert_eq!(actor.statistic_modifier("thievery"), Some(11));
        assert_eq!(actor.statistic_modifier("arcana"), Some(6));
        assert_eq!(actor.statistic_modifier("society"), Some(4));
        assert_eq!(actor.statistic_modifier("crafting"), Some(2));
    }

    #[test]
    fn short_skill_keys() {
        let actor =
            SheetActor::from_json(r#"{"name":"Mira","skills":{"thi":{"mod":8}}}"#).unwrap();
        assert_eq!(actor.statistic_modifier("thievery"), Some(8));
    }

    #[test]
    fn falls_back_to_key_ability() {
        let actor = SheetActor::from_json(
            r#"{"name":"Mira","abilities":{"dex":{"mod":4},"int":{"mod":2}}}"#,
        )
        .unwrap();
        assert_eq!(actor.statistic_modifier("thievery"), Some(4));
        assert_eq!(actor.statistic_modifier("occultism"), Some(2));
        assert_eq!(actor.statistic_modifier("religion"), None);
    }

    #[test]
    fn unknown_statistic_has_no_fallback() {
        let actor =
            SheetActor::from_json(r#"{"name":"Mira","abilities":{"dex":4}}"#).unwrap();
        assert_eq!(actor.statistic_modifier("lore-locks"), None);
    }

    #[test]
    fn system_block_overrides_top_level() {
        let actor = SheetActor::from_json(
            r#"{"name":"Mira","skills":{"thievery":3},
                "system":{"skills":{"thievery":{"totalModifier":12}}}}"#,
        )
        .unwrap();
        assert_eq!(actor.statistic_modifier("thievery"), Some(12));
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(SheetActor::from_json(r#"{"skills":{}}"#).is_err());
    }
}
