//! TOML-backed user settings.
//!
//! Interval durations and notification toggles, stored at
//! `~/.config/pomobar/config.toml`. The store is host-owned from the
//! timer's point of view: values are read lazily at phase start and at
//! render time, so a live change takes effect at the next phase start,
//! not mid-countdown.
//!
//! Dotted keys (`timer.work_minutes`, `notifications.sound`) address
//! individual fields for the panel's pass-through updates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Interval durations, in minutes, plus the long-break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// A break becomes a long break every this many completed work
    /// sessions.
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
}

/// Session-end notification toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Audible cue at interval boundaries.
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// User settings.
///
/// Serialized to/from TOML at `~/.config/pomobar/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

// Default functions
fn default_work_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_before_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sound: true,
        }
    }
}

/// Returns `~/.config/pomobar/`, creating it on first use.
fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("pomobar");
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::Save {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Settings {
    /// Default on-disk location of the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Read settings from `path`, substituting defaults for a missing
    /// file, a file that does not parse, and out-of-range durations.
    /// Never fails.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<Settings>(&content)
                .unwrap_or_default()
                .sanitize(),
            Err(_) => Self::default(),
        }
    }

    /// Read settings from the default location. Never fails.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Save {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Save {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory is unavailable or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Zero durations and a zero cadence make no sense as intervals;
    /// they fall back to the documented defaults.
    pub fn sanitize(mut self) -> Self {
        let defaults = TimerSettings::default();
        if self.timer.work_minutes == 0 {
            self.timer.work_minutes = defaults.work_minutes;
        }
        if self.timer.break_minutes == 0 {
            self.timer.break_minutes = defaults.break_minutes;
        }
        if self.timer.long_break_minutes == 0 {
            self.timer.long_break_minutes = defaults.long_break_minutes;
        }
        if self.timer.sessions_before_long_break == 0 {
            self.timer.sessions_before_long_break = defaults.sessions_before_long_break;
        }
        self
    }

    /// Read a settings value by dotted key, e.g. `timer.work_minutes`.
    pub fn get_key(&self, key: &str) -> Option<Value> {
        let mut node = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            node = node.get(part)?.clone();
        }
        Some(node)
    }

    /// Write a settings value by dotted key. The new value must match
    /// the type of the field it targets; unknown keys are rejected.
    ///
    /// The change is in-memory only; callers decide when to persist.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKey` for a key that names no field and
    /// `InvalidValue` for a type mismatch or out-of-range number.
    pub fn set_key(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let mut root = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        let mut parts: Vec<&str> = key.split('.').collect();
        let leaf = match parts.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        };
        let mut node = &mut root;
        for part in &parts {
            node = node.get_mut(*part).ok_or_else(|| ConfigError::UnknownKey {
                key: key.to_string(),
            })?;
        }
        let slot = node
            .as_object_mut()
            .and_then(|obj| obj.get_mut(leaf))
            .ok_or_else(|| ConfigError::UnknownKey {
                key: key.to_string(),
            })?;

        if std::mem::discriminant(slot) != std::mem::discriminant(&value) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected {}, got {}", json_type(slot), json_type(&value)),
            });
        }
        *slot = value;

        *self = serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
