use serde::Serialize;

pub type Percent = u8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleOutcome {
    pub id: String,
    pub title: String,
    pub description: String,
    pub traits: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyOutcome {
    pub tier: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub total_answered: usize,
    pub total_scored: usize,
    pub total_weight: f64,
    pub match_weight: f64,
    pub delete_count: usize,
    pub accuracy_percent: Percent,
    pub deletes_percent: Percent,
    pub insufficient_data: bool,
    pub style: StyleOutcome,
    pub accuracy_tier: AccuracyOutcome,
    /// Style description after the divergent/perfect narrative overrides.
    pub description: String,
    pub matches_display: String,
    pub accuracy_display: String,
}
