use super::QuizReport;

pub fn to_json(report: &QuizReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
