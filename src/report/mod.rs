pub mod json;
pub mod md;
pub mod share;

use crate::error::QuizError;
use crate::types::config::QuizConfig;
use crate::types::scoring::ScoreSummary;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Share,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    pub version: String,
    pub generated_at: String,
    pub table_fingerprint: String,
    pub scenario_count: usize,
    pub summary: ScoreSummary,
}

impl QuizReport {
    pub fn new(summary: ScoreSummary, table_fingerprint: String, scenario_count: usize) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            table_fingerprint,
            scenario_count,
            summary,
        }
    }
}

pub fn render(
    report: &QuizReport,
    format: OutputFormat,
    config: &QuizConfig,
) -> Result<String, QuizError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(QuizError::Json),
        OutputFormat::Md => Ok(md::to_markdown(&report.summary)),
        OutputFormat::Share => Ok(share::share_text(&report.summary, &config.share)),
    }
}
