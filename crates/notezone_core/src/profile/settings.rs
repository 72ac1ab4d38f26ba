//! `settings.json` persistence.
//!
//! # Invariants
//! - Loading never fails; missing or corrupt files yield defaults.
//! - Fields absent from a stored file take their default values.

use crate::store::error::{StoreError, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

const SETTINGS_LABEL: &str = "settings.json";

/// User preferences, stored as a flat camelCase object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// `dark` or `light`.
    pub theme: String,
    /// `sans`, `serif` or `monospace`.
    pub notebook_font: String,
    pub language: String,
    /// IANA zone name.
    pub time_zone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            notebook_font: "sans".to_string(),
            language: "en".to_string(),
            time_zone: local_time_zone(),
        }
    }
}

/// Loads settings, falling back to defaults on any failure.
pub async fn load_settings(path: &Path) -> Settings {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) => {
            info!("event=settings_load module=profile status=default reason={err}");
            return Settings::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            warn!("event=settings_load module=profile status=default reason={err}");
            Settings::default()
        }
    }
}

/// Saves settings as pretty JSON, creating the data directory if needed.
pub async fn save_settings(path: &Path, settings: &Settings) -> StoreResult<()> {
    let encoded = serde_json::to_string_pretty(settings)
        .map_err(|err| StoreError::corrupt(SETTINGS_LABEL, err))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| StoreError::from_io(SETTINGS_LABEL, err))?;
    }
    fs::write(path, encoded)
        .await
        .map_err(|err| StoreError::from_io(SETTINGS_LABEL, err))
}

fn local_time_zone() -> String {
    std::env::var("TZ")
        .ok()
        .map(|value| value.trim().trim_start_matches(':').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}
