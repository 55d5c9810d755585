//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Default allocation mode and time budget
//! - The usual team roster
//! - Countdown colour thresholds
//!
//! Configuration is stored at `~/.config/lightning-round/config.toml`.
//! No meeting state is ever written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::meeting::AllocationMode;
use crate::roster::split_names;

/// Meeting setup defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingConfig {
    #[serde(default)]
    pub default_mode: AllocationMode,
    /// Minutes: the whole meeting or each person, depending on the mode.
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    /// Team members offered on every round.
    #[serde(default)]
    pub roster: Vec<String>,
}

/// Countdown presentation thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fraction of a turn below which the clock turns amber.
    #[serde(default = "default_amber_ratio")]
    pub amber_ratio: f64,
    /// Seconds below which the clock turns red.
    #[serde(default = "default_critical_secs")]
    pub critical_secs: u64,
    #[serde(default = "default_true")]
    pub show_next_speaker: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/lightning-round/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub meeting: MeetingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_minutes() -> u32 {
    30
}
fn default_amber_ratio() -> f64 {
    0.2
}
fn default_critical_secs() -> u64 {
    5
}
fn default_true() -> bool {
    true
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            default_mode: AllocationMode::default(),
            default_minutes: default_minutes(),
            roster: Vec::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            amber_ratio: default_amber_ratio(),
            critical_secs: default_critical_secs(),
            show_next_speaker: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    // Same spellings as `--mode`, stored in canonical form.
                    serde_json::Value::String(_) if key == "meeting.default_mode" => {
                        let mode = value
                            .parse::<AllocationMode>()
                            .map_err(|e| invalid(e.to_string()))?;
                        serde_json::Value::String(mode.to_string())
                    }
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("{e}")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    // Lists accept JSON or a plain comma-separated string.
                    serde_json::Value::Array(_) if !value.trim_start().starts_with('[') => {
                        serde_json::Value::Array(
                            split_names(value)
                                .map(|s| serde_json::Value::String(s.to_string()))
                                .collect(),
                        )
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(format!("{e}")))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of `config.toml`.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Reject values no meeting could use.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.meeting.default_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "meeting.default_minutes".into(),
                message: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.display.amber_ratio) {
            return Err(ConfigError::InvalidValue {
                key: "display.amber_ratio".into(),
                message: format!("{} is outside 0.0..=1.0", self.display.amber_ratio),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn update(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(key, value)?;
        self.save()
    }
}
