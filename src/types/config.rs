use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const PERCENT_MAX: u8 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnansweredPolicy {
    /// Unanswered scenarios are left out of every denominator.
    #[default]
    Exclude,
    /// Unanswered scenarios count as misses in both denominators.
    CountAsMiss,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StyleBand {
    pub id: String,
    pub low: u8,
    pub high: u8,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub traits: String,
}

impl StyleBand {
    pub fn contains(&self, percent: u8) -> bool {
        (self.low..=self.high).contains(&percent)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccuracyBand {
    pub min: u8,
    pub tier: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Captions {
    #[serde(default = "default_matches_caption")]
    pub matches: String,
    #[serde(default = "default_accuracy_caption")]
    pub accuracy: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Narrative {
    #[serde(default = "default_divergent")]
    pub divergent: String,
    #[serde(default = "default_perfect")]
    pub perfect: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsufficientText {
    #[serde(default = "default_insufficient_title")]
    pub title: String,
    #[serde(default = "default_insufficient_description")]
    pub description: String,
    #[serde(default = "default_insufficient_tier")]
    pub tier: String,
    #[serde(default = "default_insufficient_note")]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub unanswered: UnansweredPolicy,
    #[serde(default = "default_style_bands")]
    pub styles: Vec<StyleBand>,
    #[serde(default = "default_accuracy_bands")]
    pub accuracy: Vec<AccuracyBand>,
    #[serde(default)]
    pub captions: Captions,
    #[serde(default)]
    pub narrative: Narrative,
    #[serde(default)]
    pub insufficient: InsufficientText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    #[serde(default = "default_share_template")]
    pub template: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            unanswered: UnansweredPolicy::default(),
            styles: default_style_bands(),
            accuracy: default_accuracy_bands(),
            captions: Captions::default(),
            narrative: Narrative::default(),
            insufficient: InsufficientText::default(),
        }
    }
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            matches: default_matches_caption(),
            accuracy: default_accuracy_caption(),
        }
    }
}

impl Default for Narrative {
    fn default() -> Self {
        Self {
            divergent: default_divergent(),
            perfect: default_perfect(),
        }
    }
}

impl Default for InsufficientText {
    fn default() -> Self {
        Self {
            title: default_insufficient_title(),
            description: default_insufficient_description(),
            tier: default_insufficient_tier(),
            note: default_insufficient_note(),
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            template: default_share_template(),
        }
    }
}

fn default_matches_caption() -> String {
    "matched the real moderators".to_string()
}

fn default_accuracy_caption() -> String {
    "moderation accuracy".to_string()
}

fn default_divergent() -> String {
    "You and the real moderators never agreed once. Either they are wrong or you run a very different forum.".to_string()
}

fn default_perfect() -> String {
    "Every call you made matched the real moderators.".to_string()
}

fn default_insufficient_title() -> String {
    "Not enough data".to_string()
}

fn default_insufficient_description() -> String {
    "Answer more scenarios to get a moderation style.".to_string()
}

fn default_insufficient_tier() -> String {
    "Unrated".to_string()
}

fn default_insufficient_note() -> String {
    "No scenarios were answered.".to_string()
}

fn default_share_template() -> String {
    "I was a moderator and survived! Moderation style: {style}. Match with the real moderators: {accuracy}. #modquiz".to_string()
}

pub fn default_style_bands() -> Vec<StyleBand> {
    vec![
        StyleBand {
            id: "liberal".to_string(),
            low: 0,
            high: 24,
            title: "Liberal".to_string(),
            description: "You believe in free speech and step in as little as possible.".to_string(),
            traits: "tolerant, hands-off, trusts the community".to_string(),
        },
        StyleBand {
            id: "balanced".to_string(),
            low: 25,
            high: 49,
            title: "Balanced".to_string(),
            description: "You find the middle ground between free speech and order.".to_string(),
            traits: "measured, context-aware, consistent".to_string(),
        },
        StyleBand {
            id: "strict".to_string(),
            low: 50,
            high: 74,
            title: "Strict".to_string(),
            description: "You do not tolerate violations and keep firm discipline.".to_string(),
            traits: "firm, rule-driven, quick to act".to_string(),
        },
        StyleBand {
            id: "iron_fist".to_string(),
            low: 75,
            high: 100,
            title: "Iron Fist".to_string(),
            description: "When in doubt, you delete. The thread is quiet, maybe too quiet.".to_string(),
            traits: "uncompromising, zero tolerance, decisive".to_string(),
        },
    ]
}

pub fn default_accuracy_bands() -> Vec<AccuracyBand> {
    vec![
        AccuracyBand {
            min: 0,
            tier: "Novice".to_string(),
            note: "Your calls often differ from what experienced moderators did.".to_string(),
        },
        AccuracyBand {
            min: 50,
            tier: "Experienced".to_string(),
            note: "You agree with the real moderators more often than not.".to_string(),
        },
        AccuracyBand {
            min: 80,
            tier: "Expert".to_string(),
            note: "Your judgement closely tracks professional moderation.".to_string(),
        },
    ]
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), QuizError> {
        validate_style_bands(&self.scoring.styles)?;
        validate_accuracy_bands(&self.scoring.accuracy)?;

        let captions = &self.scoring.captions;
        if captions.matches.trim().is_empty() || captions.accuracy.trim().is_empty() {
            return Err(QuizError::ConfigParse(
                "scoring.captions values must be non-empty".to_string(),
            ));
        }

        for placeholder in ["{style}", "{accuracy}"] {
            if !self.share.template.contains(placeholder) {
                return Err(QuizError::ConfigParse(format!(
                    "share.template must contain the {placeholder} placeholder"
                )));
            }
        }

        Ok(())
    }
}

/// Style bands must partition `[0, 100]` into contiguous closed intervals.
pub fn validate_style_bands(bands: &[StyleBand]) -> Result<(), QuizError> {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Err(QuizError::ConfigParse(
            "scoring.styles must contain at least one band".to_string(),
        ));
    };
    if first.low != 0 {
        return Err(QuizError::ConfigParse(format!(
            "scoring.styles must start at 0 (found {})",
            first.low
        )));
    }
    if last.high != PERCENT_MAX {
        return Err(QuizError::ConfigParse(format!(
            "scoring.styles must end at {PERCENT_MAX} (found {})",
            last.high
        )));
    }

    let mut ids = HashSet::new();
    for band in bands {
        if band.low > band.high {
            return Err(QuizError::ConfigParse(format!(
                "scoring.styles band '{}' has low {} above high {}",
                band.id, band.low, band.high
            )));
        }
        if !ids.insert(band.id.as_str()) {
            return Err(QuizError::ConfigParse(format!(
                "scoring.styles contains duplicate id: {}",
                band.id
            )));
        }
    }

    for pair in bands.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        if u16::from(next.low) != u16::from(previous.high) + 1 {
            return Err(QuizError::ConfigParse(format!(
                "scoring.styles bands '{}' and '{}' must be contiguous ({} then {})",
                previous.id, next.id, previous.high, next.low
            )));
        }
    }

    Ok(())
}

/// Accuracy bands are keyed by their inclusive lower cut point, ascending from 0.
pub fn validate_accuracy_bands(bands: &[AccuracyBand]) -> Result<(), QuizError> {
    let Some(first) = bands.first() else {
        return Err(QuizError::ConfigParse(
            "scoring.accuracy must contain at least one band".to_string(),
        ));
    };
    if first.min != 0 {
        return Err(QuizError::ConfigParse(format!(
            "scoring.accuracy must start at 0 (found {})",
            first.min
        )));
    }
    if let Some(band) = bands.iter().find(|band| band.min > PERCENT_MAX) {
        return Err(QuizError::ConfigParse(format!(
            "scoring.accuracy cut point {} exceeds {PERCENT_MAX}",
            band.min
        )));
    }
    for pair in bands.windows(2) {
        if pair[1].min <= pair[0].min {
            return Err(QuizError::ConfigParse(format!(
                "scoring.accuracy cut points must be strictly ascending ({} then {})",
                pair[0].min, pair[1].min
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(id: &str, low: u8, high: u8) -> StyleBand {
        StyleBand {
            id: id.to_string(),
            low,
            high,
            title: id.to_string(),
            description: String::new(),
            traits: String::new(),
        }
    }

    fn tier(min: u8) -> AccuracyBand {
        AccuracyBand {
            min,
            tier: format!("tier-{min}"),
            note: String::new(),
        }
    }

    #[test]
    fn defaults_parse_from_empty_document() {
        let cfg: QuizConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.scoring.unanswered, UnansweredPolicy::Exclude);
        assert_eq!(cfg.scoring.styles, default_style_bands());
        assert_eq!(cfg.scoring.accuracy.len(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_scoring_section() {
        let cfg: QuizConfig = toml::from_str(
            r#"
[scoring]
unanswered = "count_as_miss"

[[scoring.styles]]
id = "soft"
low = 0
high = 59
title = "Soft"
description = "soft"

[[scoring.styles]]
id = "hard"
low = 60
high = 100
title = "Hard"
description = "hard"
traits = "stern"

[[scoring.accuracy]]
min = 0
tier = "Learning"

[[scoring.accuracy]]
min = 70
tier = "Pro"
note = "nice"

[scoring.captions]
matches = "hits"

[share]
template = "{style} / {accuracy}"
"#,
        )
        .expect("config should parse");

        assert_eq!(cfg.scoring.unanswered, UnansweredPolicy::CountAsMiss);
        assert_eq!(cfg.scoring.styles.len(), 2);
        assert_eq!(cfg.scoring.styles[1].traits, "stern");
        assert_eq!(cfg.scoring.accuracy[1].min, 70);
        assert_eq!(cfg.scoring.captions.matches, "hits");
        assert_eq!(cfg.scoring.captions.accuracy, default_accuracy_caption());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn style_bands_reject_gap() {
        let err = validate_style_bands(&[band("a", 0, 40), band("b", 42, 100)])
            .expect_err("gap should be rejected");
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn style_bands_reject_overlap() {
        let err = validate_style_bands(&[band("a", 0, 50), band("b", 50, 100)])
            .expect_err("shared boundary should be rejected");
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn style_bands_reject_partial_coverage() {
        assert!(validate_style_bands(&[band("a", 5, 100)]).is_err());
        assert!(validate_style_bands(&[band("a", 0, 99)]).is_err());
        assert!(validate_style_bands(&[]).is_err());
    }

    #[test]
    fn style_bands_reject_inverted_and_duplicate_ids() {
        assert!(validate_style_bands(&[band("a", 0, 10), band("b", 11, 5)]).is_err());
        let err = validate_style_bands(&[band("a", 0, 10), band("a", 11, 100)])
            .expect_err("duplicate id should be rejected");
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn single_band_covering_everything_is_valid() {
        assert!(validate_style_bands(&[band("all", 0, 100)]).is_ok());
    }

    #[test]
    fn accuracy_bands_require_zero_start_and_ascending_cuts() {
        assert!(validate_accuracy_bands(&[tier(0), tier(50)]).is_ok());
        assert!(validate_accuracy_bands(&[tier(10), tier(50)]).is_err());
        assert!(validate_accuracy_bands(&[tier(0), tier(50), tier(50)]).is_err());
        assert!(validate_accuracy_bands(&[tier(0), tier(101)]).is_err());
        assert!(validate_accuracy_bands(&[]).is_err());
    }

    #[test]
    fn validate_rejects_share_template_without_placeholders() {
        let cfg: QuizConfig = toml::from_str(
            r#"
[share]
template = "I played {style}"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("{accuracy}"));
    }

    #[test]
    fn validate_rejects_blank_caption() {
        let cfg: QuizConfig = toml::from_str(
            r#"
[scoring.captions]
accuracy = "  "
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }
}
