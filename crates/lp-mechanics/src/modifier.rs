//! Typed check modifiers and PF2e bonus stacking.
//!
//! Item and status bonuses do not stack: only the single strongest entry of
//! each of those categories applies. Circumstance and untyped entries always
//! add up.

use serde::{Deserialize, Serialize};

/// The type of a bonus or penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusCategory {
    /// Granted by an item (tools, runes). Best single entry applies.
    Item,
    /// Granted by a spell or condition. Best single entry applies.
    Status,
    /// Granted by the situation. All entries add up.
    Circumstance,
    /// Untyped modifiers. All entries add up.
    Untyped,
}

impl BonusCategory {
    /// Parse a category name such as "item" or "Circumstance".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "item" => Some(Self::Item),
            "status" => Some(Self::Status),
            "circumstance" | "circ" => Some(Self::Circumstance),
            "untyped" | "none" => Some(Self::Untyped),
            _ => None,
        }
    }
}

impl std::fmt::Display for BonusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "Item"),
            Self::Status => write!(f, "Status"),
            Self::Circumstance => write!(f, "Circumstance"),
            Self::Untyped => write!(f, "Untyped"),
        }
    }
}

/// A single typed bonus (positive) or penalty (negative).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    /// Raw value as entered. Non-finite values are ignored when aggregating.
    pub value: f64,
    /// Stacking category.
    pub category: BonusCategory,
}

impl Modifier {
    /// Create a modifier from a raw value.
    pub fn new(value: f64, category: BonusCategory) -> Self {
        Self { value, category }
    }

    /// Parse a raw form value such as `"+2"` or `"-1"`.
    ///
    /// Returns `None` for text that is not a finite number, so the entry is
    /// dropped instead of poisoning the total.
    pub fn parse(value: &str, category: BonusCategory) -> Option<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let value = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { value, category })
    }

    /// Parse a `value:category` pair such as `"2:item"` or `"-1:circumstance"`.
    /// A bare value is treated as a circumstance bonus.
    pub fn parse_pair(pair: &str) -> Option<Self> {
        match pair.split_once(':') {
            Some((value, category)) => Self::parse(value, BonusCategory::parse(category)?),
            None => Self::parse(pair, BonusCategory::Circumstance),
        }
    }

    fn effective_value(&self) -> Option<i32> {
        // `as` saturates for values outside the i32 range.
        self.value
            .is_finite()
            .then(|| self.value.round() as i32)
    }
}

/// The effective result of stacking a list of modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedModifier {
    /// The strongest item bonus or penalty, or 0.
    pub item_effective: i32,
    /// The strongest status bonus or penalty, or 0.
    pub status_effective: i32,
    /// Sum of all circumstance entries.
    pub circumstance_sum: i32,
    /// Sum of all untyped entries.
    pub untyped_sum: i32,
    /// Sum of the four fields above.
    pub total: i32,
}

/// Combine modifiers using PF2e stacking rules.
///
/// For item and status, the entry with the largest absolute value wins, the
/// first one seen on ties. Non-finite values are discarded; fractional values
/// are rounded to the nearest integer.
pub fn aggregate(modifiers: &[Modifier]) -> AggregatedModifier {
    let mut item = None;
    let mut status = None;
    let mut circumstance_sum = 0i32;
    let mut untyped_sum = 0i32;

    for modifier in modifiers {
        let Some(value) = modifier.effective_value() else {
            continue;
        };
        match modifier.category {
            BonusCategory::Item => keep_strongest(&mut item, value),
            BonusCategory::Status => keep_strongest(&mut status, value),
            BonusCategory::Circumstance => {
                circumstance_sum = circumstance_sum.saturating_add(value);
            }
            BonusCategory::Untyped => untyped_sum = untyped_sum.saturating_add(value),
        }
    }

    let item_effective = item.unwrap_or(0);
    let status_effective = status.unwrap_or(0);
    AggregatedModifier {
        item_effective,
        status_effective,
        circumstance_sum,
        untyped_sum,
        total: item_effective
            .saturating_add(status_effective)
            .saturating_add(circumstance_sum)
            .saturating_add(untyped_sum),
    }
}

fn keep_strongest(slot: &mut Option<i32>, value: i32) {
    match slot {
        Some(current) if current.unsigned_abs() >= value.unsigned_abs() => {}
        _ => *slot = Some(value),
    }
}
