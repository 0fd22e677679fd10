//! Host-boundary settings access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pomobar_core::{ConfigError, Settings};
use serde_json::Value;
use tracing::warn;

/// Host-owned key/value settings namespace.
///
/// The session reads it lazily at phase start and at render time and
/// never caches across starts, so a live change takes effect at the
/// next phase start.
pub trait SettingsStore: Send + Sync {
    /// Current settings, with defaults substituted for anything missing
    /// or invalid.
    fn snapshot(&self) -> Settings;

    /// Pass-through write of dotted-key updates, e.g.
    /// `{"timer.work_minutes": 30}`. Entries that name no field or do
    /// not fit their field are skipped; the rest of the batch still
    /// applies.
    ///
    /// # Errors
    ///
    /// Returns an error only when the updated settings cannot be
    /// persisted.
    fn apply(&self, changes: &BTreeMap<String, Value>) -> Result<(), ConfigError>;
}

/// Settings backed by the TOML file under the user config directory.
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Store at the default location
    /// (`~/.config/pomobar/config.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            path: Settings::default_path()?,
        })
    }

    /// Store at an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for FileSettings {
    fn snapshot(&self) -> Settings {
        Settings::load_from(&self.path)
    }

    fn apply(&self, changes: &BTreeMap<String, Value>) -> Result<(), ConfigError> {
        let mut settings = Settings::load_from(&self.path);
        for (key, value) in changes {
            if let Err(error) = settings.set_key(key, value.clone()) {
                warn!(%error, %key, "skipping settings update entry");
            }
        }
        settings.sanitize().save_to(&self.path)
    }
}
