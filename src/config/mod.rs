use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
    storage::{
        json_backend::{tmp_path, write_atomic},
        DEFAULT_STORAGE_KEY,
    },
};

const DEFAULT_MONTH_LABELS: [&str; 6] = ["Jan", "Fev", "Mar", "Abr", "Mai", "Jun"];

/// User-tunable settings persisted next to the ledger data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_key: String,
    pub month_labels: Vec<String>,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            month_labels: DEFAULT_MONTH_LABELS.iter().map(|m| m.to_string()).collect(),
            color_output: true,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 3] = ["storage_key", "month_labels", "color_output"];

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "storage_key" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(LedgerError::Config("storage_key must not be empty".into()));
                }
                self.storage_key = value.to_string();
            }
            "month_labels" => {
                let labels: Vec<String> = value
                    .split(',')
                    .map(|label| label.trim().to_string())
                    .filter(|label| !label.is_empty())
                    .collect();
                if labels.is_empty() {
                    return Err(LedgerError::Config(
                        "month_labels needs at least one label".into(),
                    ));
                }
                self.month_labels = labels;
            }
            "color_output" => {
                self.color_output = match value.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    other => {
                        return Err(LedgerError::Config(format!(
                            "color_output expects on/off, got `{other}`"
                        )))
                    }
                };
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (expected one of {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage_key" => Some(self.storage_key.clone()),
            "month_labels" => Some(self.month_labels.join(",")),
            "color_output" => Some(if self.color_output { "on" } else { "off" }.to_string()),
            _ => None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the config file; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{} is not valid: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
