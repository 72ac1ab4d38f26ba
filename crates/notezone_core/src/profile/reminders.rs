//! `reminders.json` persistence.
//!
//! Reminder entries are opaque JSON values owned by the UI.

use crate::store::error::{StoreError, StoreResult};
use log::{error, warn};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

const REMINDERS_LABEL: &str = "reminders.json";
const EMPTY_REMINDERS: &str = "[]";

/// Loads reminders; a missing or corrupt file is reset to `[]`.
pub async fn load_reminders(path: &Path) -> Vec<Value> {
    let parsed = match fs::read_to_string(path).await {
        Ok(raw) => serde_json::from_str::<Vec<Value>>(&raw).map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };
    match parsed {
        Ok(reminders) => reminders,
        Err(reason) => {
            warn!("event=reminders_load module=profile status=reset reason={reason}");
            if let Err(err) = write_raw(path, EMPTY_REMINDERS).await {
                error!("event=reminders_reset module=profile status=error error={err}");
            }
            Vec::new()
        }
    }
}

/// Saves reminders as compact JSON.
pub async fn save_reminders(path: &Path, reminders: &[Value]) -> StoreResult<()> {
    let encoded = serde_json::to_string(reminders)
        .map_err(|err| StoreError::corrupt(REMINDERS_LABEL, err))?;
    write_raw(path, &encoded).await
}

async fn write_raw(path: &Path, raw: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| StoreError::from_io(REMINDERS_LABEL, err))?;
    }
    fs::write(path, raw)
        .await
        .map_err(|err| StoreError::from_io(REMINDERS_LABEL, err))
}
