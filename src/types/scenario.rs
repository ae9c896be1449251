use crate::error::QuizError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Keep,
    Delete,
    Warn,
    Hide,
    Highlight,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Keep,
        Action::Delete,
        Action::Warn,
        Action::Hide,
        Action::Highlight,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Delete => "delete",
            Self::Warn => "warn",
            Self::Hide => "hide",
            Self::Highlight => "highlight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Keep => "Keep",
            Self::Delete => "Delete",
            Self::Warn => "Warn",
            Self::Hide => "Hide",
            Self::Highlight => "Mark as exemplary",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Action {
    type Err = QuizError;

    /// Accepts the action id or its display label, ignoring case.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|action| {
                action.id().eq_ignore_ascii_case(needle)
                    || action.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| QuizError::UnknownAction(needle.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadActivity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsequenceType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub real_moderator_action: Action,
    #[serde(default)]
    pub player_stats: BTreeMap<String, u32>,
    #[serde(default)]
    pub consequence: String,
    #[serde(default = "default_consequence_type")]
    pub consequence_type: ConsequenceType,
}

fn default_consequence_type() -> ConsequenceType {
    ConsequenceType::Neutral
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u32,
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub reports: u32,
    pub thread_activity: Option<ThreadActivity>,
    pub result: ScenarioResult,
}

impl Scenario {
    /// Weight used for scoring. Missing, non-finite and non-positive values fall back to 1.
    pub fn effective_weight(&self) -> f64 {
        match self.weight {
            Some(weight) if weight.is_finite() && weight > 0.0 => weight,
            _ => DEFAULT_WEIGHT,
        }
    }

    pub fn player_share(&self, action: Action) -> u32 {
        self.result
            .player_stats
            .get(action.id())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Other(serde::de::IgnoredAny),
}

// A weight of the wrong type degrades to the default instead of failing the table load.
fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawWeight>::deserialize(deserializer)? {
        Some(RawWeight::Number(weight)) => Some(weight),
        Some(RawWeight::Other(_)) | None => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub scenario_id: u32,
    pub action: Action,
}

impl Decision {
    pub fn new(scenario_id: u32, action: Action) -> Self {
        Self {
            scenario_id,
            action,
        }
    }
}

impl FromStr for Decision {
    type Err = QuizError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (id, action) = input
            .split_once('=')
            .ok_or_else(|| QuizError::InvalidDecision(input.to_string()))?;
        let scenario_id = id
            .trim()
            .parse::<u32>()
            .map_err(|_| QuizError::InvalidDecision(input.to_string()))?;
        Ok(Self::new(scenario_id, action.parse()?))
    }
}
