use crate::error::{QuizError, Result};
use crate::types::scenario::{Action, Scenario};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUILTIN_TABLE: &str = include_str!("../data/scenarios.toml");

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

#[derive(Serialize)]
struct ScoringKey {
    id: u32,
    weight: f64,
    real: Action,
}

/// Ordered, validated scenario table. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ScenarioTable {
    scenarios: Vec<Scenario>,
}

impl ScenarioTable {
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        validate(&scenarios)?;
        Ok(Self { scenarios })
    }

    pub fn builtin() -> Result<Self> {
        let file: ScenarioFile = toml::from_str(BUILTIN_TABLE)?;
        Self::new(file.scenarios)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scenario> {
        self.scenarios.get(index)
    }

    /// SHA-256 over the fields that affect scoring, so display-text edits keep the digest.
    pub fn fingerprint(&self) -> Result<String> {
        let keys: Vec<ScoringKey> = self
            .scenarios
            .iter()
            .map(|scenario| ScoringKey {
                id: scenario.id,
                weight: scenario.effective_weight(),
                real: scenario.result.real_moderator_action,
            })
            .collect();
        let bytes = serde_json::to_vec(&keys)?;
        Ok(sha256_hex(&bytes))
    }
}

/// Loads the table from `path`, or the built-in table when no path is given.
pub fn load_table(path: Option<&Path>) -> Result<ScenarioTable> {
    let Some(path) = path else {
        tracing::debug!("using built-in scenario table");
        return ScenarioTable::builtin();
    };
    if !path.exists() {
        return Err(QuizError::PathNotFound(path.display().to_string()));
    }

    let files = if path.is_dir() {
        table_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut scenarios = Vec::new();
    for file in &files {
        let mut parsed = read_table_file(file)?;
        tracing::debug!(file = %file.display(), count = parsed.len(), "loaded scenario file");
        scenarios.append(&mut parsed);
    }
    ScenarioTable::new(scenarios)
}

fn table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_table_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    if files.is_empty() {
        return Err(QuizError::ScenarioTable(format!(
            "no .toml or .json scenario files in {}",
            dir.display()
        )));
    }
    Ok(files)
}

fn is_table_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("toml") | Some("json")
    )
}

fn read_table_file(path: &Path) -> Result<Vec<Scenario>> {
    let content = std::fs::read_to_string(path)?;
    let file: ScenarioFile = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)
            .map_err(|e| QuizError::ScenarioTable(format!("{}: {}", path.display(), e)))?,
    };
    Ok(file.scenarios)
}

fn validate(scenarios: &[Scenario]) -> Result<()> {
    if scenarios.is_empty() {
        return Err(QuizError::ScenarioTable(
            "table must contain at least one scenario".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.id) {
            return Err(QuizError::ScenarioTable(format!(
                "duplicate scenario id: {}",
                scenario.id
            )));
        }
        for (action, share) in &scenario.result.player_stats {
            if action.parse::<Action>().is_err() {
                return Err(QuizError::ScenarioTable(format!(
                    "scenario {} has player_stats for unknown action '{action}'",
                    scenario.id
                )));
            }
            if *share > 100 {
                return Err(QuizError::ScenarioTable(format!(
                    "scenario {} player_stats.{action} must be between 0 and 100",
                    scenario.id
                )));
            }
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
