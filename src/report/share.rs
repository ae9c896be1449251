use crate::types::config::ShareConfig;
use crate::types::scoring::ScoreSummary;

/// Fills the share template from already-computed display strings.
pub fn share_text(summary: &ScoreSummary, share: &ShareConfig) -> String {
    share
        .template
        .replace("{style}", &summary.style.title)
        .replace("{accuracy}", &format!("{}%", summary.accuracy_percent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_results;
    use crate::scenarios::ScenarioTable;
    use crate::types::config::ScoringConfig;
    use crate::types::scenario::{Action, Decision};

    #[test]
    fn share_text_substitutes_style_and_accuracy() {
        let table = ScenarioTable::builtin().expect("built-in table should load");
        let decisions: Vec<Decision> = (1..=8).map(|id| Decision::new(id, Action::Delete)).collect();
        let summary = compute_results(table.scenarios(), &decisions, &ScoringConfig::default());

        let text = share_text(
            &summary,
            &ShareConfig {
                template: "Style: {style}. Match: {accuracy}.".to_string(),
            },
        );
        assert_eq!(text, "Style: Iron Fist. Match: 25%.");
    }
}
