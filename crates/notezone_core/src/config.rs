//! Application data locations.
//!
//! # Responsibility
//! - Resolve the user data directory and derive the store root and the
//!   settings/reminders file locations from it.
//!
//! # Invariants
//! - `NOTEZONE_DATA_DIR` wins when set and non-blank.
//! - Resolution never fails; it falls back to the OS temp directory.

use std::path::{Path, PathBuf};

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "NOTEZONE_DATA_DIR";

const APP_DIR_NAME: &str = "notezone";
const NOTES_DIR_NAME: &str = "Notes";
const SETTINGS_FILE_NAME: &str = "settings.json";
const REMINDERS_FILE_NAME: &str = "reminders.json";

/// Resolved persistent file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    /// Store root handed to `DocumentStore`.
    pub notes_dir: PathBuf,
    pub settings_file: PathBuf,
    pub reminders_file: PathBuf,
}

impl AppPaths {
    /// Derives all locations from an explicit data directory.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            notes_dir: data_dir.join(NOTES_DIR_NAME),
            settings_file: data_dir.join(SETTINGS_FILE_NAME),
            reminders_file: data_dir.join(REMINDERS_FILE_NAME),
            data_dir,
        }
    }

    /// Resolves from the environment override or the platform data dir.
    pub fn resolve() -> Self {
        Self::from_data_dir(resolve_data_dir(std::env::var(DATA_DIR_ENV).ok()))
    }
}

fn resolve_data_dir(override_dir: Option<String>) -> PathBuf {
    if let Some(raw) = override_dir {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
