pub mod bands;

use crate::types::config::{ScoringConfig, UnansweredPolicy};
use crate::types::scenario::{Action, Decision, Scenario};
use crate::types::scoring::{AccuracyOutcome, Percent, ScoreSummary, StyleOutcome};
use std::collections::HashMap;

const INSUFFICIENT_STYLE_ID: &str = "insufficient";

#[derive(Debug, Default)]
struct Tally {
    total_answered: usize,
    total_scored: usize,
    total_weight: f64,
    match_weight: f64,
    delete_count: usize,
}

/// Scores a play session against the scenario table.
///
/// Total over its inputs: decisions for unknown ids are ignored, a repeated id
/// keeps its last decision, and a session with nothing answered yields the
/// configured insufficient-data summary.
pub fn compute_results(
    scenarios: &[Scenario],
    decisions: &[Decision],
    config: &ScoringConfig,
) -> ScoreSummary {
    let by_id: HashMap<u32, Action> = decisions
        .iter()
        .map(|decision| (decision.scenario_id, decision.action))
        .collect();

    let mut tally = Tally::default();
    for scenario in scenarios {
        let weight = scenario.effective_weight();
        match by_id.get(&scenario.id) {
            Some(&choice) => {
                tally.total_answered += 1;
                tally.total_scored += 1;
                tally.total_weight += weight;
                if choice == Action::Delete {
                    tally.delete_count += 1;
                }
                if choice == scenario.result.real_moderator_action {
                    tally.match_weight += weight;
                }
            }
            None if config.unanswered == UnansweredPolicy::CountAsMiss => {
                tally.total_scored += 1;
                tally.total_weight += weight;
            }
            None => {}
        }
    }

    tracing::debug!(
        answered = tally.total_answered,
        scored = tally.total_scored,
        total_weight = tally.total_weight,
        match_weight = tally.match_weight,
        deletes = tally.delete_count,
        "tallied session"
    );

    let usable_weight = tally.total_weight.is_finite() && tally.total_weight > 0.0;
    if tally.total_answered == 0 || !usable_weight {
        return insufficient_summary(tally, config);
    }

    let accuracy_percent = percent_of(tally.match_weight, tally.total_weight);
    let deletes_percent = percent_of(tally.delete_count as f64, tally.total_scored as f64);

    let style = bands::classify_style(&config.styles, i64::from(deletes_percent))
        .map(|band| StyleOutcome {
            id: band.id.clone(),
            title: band.title.clone(),
            description: band.description.clone(),
            traits: band.traits.clone(),
        })
        .unwrap_or_else(|| insufficient_style(config));
    let accuracy_tier = bands::classify_accuracy(&config.accuracy, i64::from(accuracy_percent))
        .map(|band| AccuracyOutcome {
            tier: band.tier.clone(),
            note: band.note.clone(),
        })
        .unwrap_or_else(|| insufficient_tier(config));

    let matches = tally.match_weight.round() as i64;
    let mut description = style.description.clone();
    if matches == 0 {
        description = config.narrative.divergent.clone();
    }
    if usize::try_from(matches).is_ok_and(|matches| matches == tally.total_scored) {
        description = format!("{description} {}", config.narrative.perfect);
    }

    ScoreSummary {
        matches_display: matches_display(matches, tally.total_scored, config),
        accuracy_display: accuracy_display(accuracy_percent, config),
        total_answered: tally.total_answered,
        total_scored: tally.total_scored,
        total_weight: tally.total_weight,
        match_weight: tally.match_weight,
        delete_count: tally.delete_count,
        accuracy_percent,
        deletes_percent,
        insufficient_data: false,
        style,
        accuracy_tier,
        description,
    }
}

fn insufficient_summary(tally: Tally, config: &ScoringConfig) -> ScoreSummary {
    tracing::debug!("not enough answered scenarios to classify");
    let style = insufficient_style(config);
    ScoreSummary {
        matches_display: matches_display(0, tally.total_answered, config),
        accuracy_display: accuracy_display(0, config),
        total_answered: tally.total_answered,
        total_scored: tally.total_scored,
        total_weight: tally.total_weight,
        match_weight: tally.match_weight,
        delete_count: tally.delete_count,
        accuracy_percent: 0,
        deletes_percent: 0,
        insufficient_data: true,
        description: style.description.clone(),
        style,
        accuracy_tier: insufficient_tier(config),
    }
}

fn insufficient_style(config: &ScoringConfig) -> StyleOutcome {
    StyleOutcome {
        id: INSUFFICIENT_STYLE_ID.to_string(),
        title: config.insufficient.title.clone(),
        description: config.insufficient.description.clone(),
        traits: String::new(),
    }
}

fn insufficient_tier(config: &ScoringConfig) -> AccuracyOutcome {
    AccuracyOutcome {
        tier: config.insufficient.tier.clone(),
        note: config.insufficient.note.clone(),
    }
}

// `total` is the scored count, so unanswered scenarios show up under `count_as_miss`.
fn matches_display(matches: i64, total: usize, config: &ScoringConfig) -> String {
    format!("{matches}/{total} {}", config.captions.matches)
}

fn accuracy_display(percent: Percent, config: &ScoringConfig) -> String {
    format!("{percent}% {}", config.captions.accuracy)
}

fn percent_of(part: f64, whole: f64) -> Percent {
    if whole <= 0.0 {
        return 0;
    }
    let raw = (part / whole * 100.0).round();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0) as Percent
}
