use crate::error::{QuizError, Result};
use crate::types::config::QuizConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "modquiz.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".modquiz/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/modquiz/config.toml";

/// Loads and validates the config visible from `root`, falling back to built-in defaults.
pub fn load_config(root: &Path) -> Result<QuizConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(root: &Path, global_path: Option<&Path>) -> Result<QuizConfig> {
    let mut merged = Value::Table(Map::new());
    let mut layers = 0;
    if let Some(path) = global_path {
        layers += usize::from(merge_file_if_exists(&mut merged, path)?);
    }
    layers += usize::from(merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?);
    layers += usize::from(merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?);
    tracing::debug!(layers, root = %root.display(), "merged config layers");

    let cfg: QuizConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| QuizError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| QuizError::ConfigParse(format!("{}: {}", path.display(), e)))
}

// Tables merge key by key; any other value, arrays included, is replaced.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
