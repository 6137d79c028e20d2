//! Persisted user preferences
//!
//! Stored separately from the score ledger, as a single JSON blob. Corrupt
//! or missing data falls back to defaults without failing the caller.

use serde::{Deserialize, Serialize};

use crate::platform::{Storage, StorageError};
use crate::theme::Theme;
use crate::tuning::Variant;

const SETTINGS_KEY: &str = "skyfall_settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub variant: Variant,
}

impl Settings {
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(SETTINGS_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("discarding corrupt settings: {err}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).unwrap_or_default();
        storage.set_item(SETTINGS_KEY, &json)
    }
}
