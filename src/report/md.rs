use crate::types::scoring::ScoreSummary;

pub fn to_markdown(summary: &ScoreSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", summary.style.title));
    output.push_str(&format!("{}\n\n", summary.description));
    output.push_str(&format!(
        "- {}\n- {}\n\n",
        summary.matches_display, summary.accuracy_display
    ));

    output.push_str("## Accuracy\n\n");
    output.push_str(&format!("Tier: {}\n\n", summary.accuracy_tier.tier));
    if !summary.accuracy_tier.note.is_empty() {
        output.push_str(&format!("_{}_\n\n", summary.accuracy_tier.note));
    }

    if summary.insufficient_data {
        return output;
    }

    output.push_str("## Style\n\n");
    output.push_str(&format!(
        "Deletes: {}/{} ({}%)\n",
        summary.delete_count, summary.total_scored, summary.deletes_percent
    ));
    if !summary.style.traits.is_empty() {
        output.push_str(&format!("Traits: {}\n", summary.style.traits));
    }

    output
}
