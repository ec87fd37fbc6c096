//! Inline check tags of the form `@Check[type:thievery|dc:40]{Pick a Lock}`.
//!
//! The tag name and keys are case-insensitive, unknown keys are ignored, and a
//! missing type falls back to Thievery. A missing, non-numeric or non-positive
//! DC invalidates the whole tag.

use serde::{Deserialize, Serialize};

use crate::error::{LockError, LockResult};
use crate::skill::Skill;

const TAG_OPEN: &str = "@check[";

/// A parsed inline check: which statistic to roll and against what DC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCheckSpec {
    /// Statistic slug, lower-cased (e.g. "thievery").
    pub statistic_type: String,
    /// Difficulty class, always positive.
    pub difficulty_class: i32,
    /// Display label from a trailing `{...}`, if present.
    pub label: Option<String>,
    /// The tag text this check was parsed from.
    pub raw: String,
}

impl RequestCheckSpec {
    /// Parse the first inline check found in `input`.
    pub fn parse(input: &str) -> LockResult<Self> {
        let tag = extract_inline_check(input)
            .ok_or_else(|| invalid("missing @Check[...] tag"))?;

        let open = TAG_OPEN.len();
        let close = tag
            .find(']')
            .ok_or_else(|| invalid("unterminated @Check tag"))?;
        let body = &tag[open..close];

        let mut statistic = None;
        let mut dc = None;
        for part in body.split('|') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let value = value.trim().to_lowercase();
            match key.trim().to_lowercase().as_str() {
                "type" => statistic = Some(value),
                "dc" => dc = Some(value),
                _ => {}
            }
        }

        let dc_text = dc.ok_or_else(|| invalid("missing dc"))?;
        let difficulty_class = dc_text
            .parse::<i32>()
            .map_err(|_| invalid(&format!("dc '{dc_text}' is not a number")))?;
        if difficulty_class <= 0 {
            return Err(invalid(&format!("dc must be positive, got {difficulty_class}")));
        }

        let statistic_type = statistic
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Skill::Thievery.slug().to_string());

        let label = tag[close + 1..]
            .split_once('{')
            .and_then(|(_, rest)| rest.strip_suffix('}'))
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Ok(Self {
            statistic_type,
            difficulty_class,
            label,
            raw: tag.to_string(),
        })
    }

    /// Human-readable name of the check (label, else the statistic).
    pub fn display_name(&self) -> String {
        match (&self.label, Skill::parse(&self.statistic_type)) {
            (Some(label), _) => label.clone(),
            (None, Some(skill)) => skill.label().to_string(),
            (None, None) => self.statistic_type.clone(),
        }
    }
}

/// Locate an inline check in pasted or dropped text.
///
/// Returns the tag, extended up to the first `{label}` after it when there is
/// one. Markup between the tag and its label is kept; anything else around
/// the tag is dropped.
pub fn extract_inline_check(text: &str) -> Option<&str> {
    // ASCII lower-casing keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let start = lower.find(TAG_OPEN)?;
    let end = start + lower[start..].find(']')? + 1;

    let rest = &text[end..];
    let label_len = rest
        .find('{')
        .and_then(|open| rest[open..].find('}').map(|close| open + close + 1))
        .unwrap_or(0);
    Some(&text[start..end + label_len])
}

fn invalid(reason: &str) -> LockError {
    LockError::InvalidRequestCheckSpec(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_tag() {
        let spec = RequestCheckSpec::parse("@Check[type:thievery|dc:40]").unwrap();
        assert_eq!(spec.statistic_type, "thievery");
        assert_eq!(spec.difficulty_class, 40);
        assert_eq!(spec.label, None);
        assert_eq!(spec.raw, "@Check[type:thievery|dc:40]");
    }

    #[test]
    fn missing_dc_is_invalid() {
        let err = RequestCheckSpec::parse("@Check[type:thievery]").unwrap_err();
        assert!(matches!(err, LockError::InvalidRequestCheckSpec(_)));
    }

    #[test]
    fn non_numeric_or_non_positive_dc_is_invalid() {
        assert!(RequestCheckSpec::parse("@Check[type:arcana|dc:hard]").is_err());
        assert!(RequestCheckSpec::parse("@Check[type:arcana|dc:0]").is_err());
        assert!(RequestCheckSpec::parse("@Check[type:arcana|dc:-5]").is_err());
    }

    #[test]
    fn missing_tag_is_invalid() {
        let err = RequestCheckSpec::parse("roll thievery dc 40").unwrap_err();
        assert!(err.to_string().contains("missing @Check"));
        assert!(RequestCheckSpec::parse("").is_err());
    }

    #[test]
    fn keys_are_case_insensitive_and_unknown_keys_ignored() {
        let spec =
            RequestCheckSpec::parse("@CHECK[ TYPE : Society | traits:secret | DC: 22 ]").unwrap();
        assert_eq!(spec.statistic_type, "society");
        assert_eq!(spec.difficulty_class, 22);
    }

    #[test]
    fn type_defaults_to_thievery() {
        let spec = RequestCheckSpec::parse("@Check[dc:18]").unwrap();
        assert_eq!(spec.statistic_type, "thievery");
    }

    #[test]
    fn label_is_captured() {
        let spec =
            RequestCheckSpec::parse("Try this: @Check[type:thievery|dc:40]{Pick a Lock} now").unwrap();
        assert_eq!(spec.label.as_deref(), Some("Pick a Lock"));
        assert_eq!(spec.raw, "@Check[type:thievery|dc:40]{Pick a Lock}");
        assert_eq!(spec.display_name(), "Pick a Lock");
    }

    #[test]
    fn display_name_falls_back_to_skill() {
        let spec = RequestCheckSpec::parse("@Check[type:occultism|dc:30]").unwrap();
        assert_eq!(spec.display_name(), "Occultism");
        let spec = RequestCheckSpec::parse("@Check[type:fortitude|dc:30]").unwrap();
        assert_eq!(spec.display_name(), "fortitude");
    }

    #[test]
    fn extract_from_markup() {
        let html = r#"<p>Drop: <a class="inline-check">@Check[type:thievery|dc:25]</a></p>"#;
        assert_eq!(extract_inline_check(html), Some("@Check[type:thievery|dc:25]"));
        assert_eq!(
            extract_inline_check("@check[dc:5] {Quick}"),
            Some("@check[dc:5] {Quick}")
        );
        assert_eq!(extract_inline_check("no tag"), None);
        assert_eq!(extract_inline_check("@Check[dc:5"), None);
    }

    #[test]
    fn label_after_intervening_markup() {
        let html = r#"<a class="inline-check">@Check[type:thievery|dc:30]</a> <em>{Vault Door}</em>"#;
        assert_eq!(
            extract_inline_check(html),
            Some("@Check[type:thievery|dc:30]</a> <em>{Vault Door}")
        );
        let spec = RequestCheckSpec::parse(html).unwrap();
        assert_eq!(spec.difficulty_class, 30);
        assert_eq!(spec.label.as_deref(), Some("Vault Door"));
    }

    #[test]
    fn unclosed_label_is_left_out() {
        assert_eq!(
            extract_inline_check("@Check[dc:12] then {oops"),
            Some("@Check[dc:12]")
        );
        let spec = RequestCheckSpec::parse("@Check[dc:12] then {oops").unwrap();
        assert_eq!(spec.label, None);
    }
}
