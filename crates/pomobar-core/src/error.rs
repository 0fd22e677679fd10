//! Error types for pomobar-core.
//!
//! The timer itself never fails; errors only surface on the explicit
//! settings read/write path.

use std::path::PathBuf;
use thiserror::Error;

/// Settings-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The dotted key does not name a known settings field
    #[error("unknown settings key: {key}")]
    UnknownKey { key: String },

    /// The value does not fit the field it targets
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to read or parse the settings file
    #[error("failed to load settings from {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// Failed to serialize or write the settings file
    #[error("failed to save settings to {path}: {message}")]
    Save { path: PathBuf, message: String },
}
