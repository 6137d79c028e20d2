//! Score ledger
//!
//! Tracks the best and most recent scores, each capped at five entries,
//! persisted as flat JSON integer arrays. Loaded once at process start and
//! written back at game over; the in-memory lists stay authoritative when
//! the backing store misbehaves.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SAVED_SCORES;
use crate::platform::{Storage, StorageError};

const BEST_KEY: &str = "skyfall_best_scores";
const RECENT_KEY: &str = "skyfall_recent_scores";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    /// Descending, length <= MAX_SAVED_SCORES
    pub best: Vec<u32>,
    /// Most-recent-first, length <= MAX_SAVED_SCORES
    pub recent: Vec<u32>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read both lists; missing or malformed data yields empty lists
    pub fn load(storage: &dyn Storage) -> Self {
        let ledger = Self {
            best: load_list(storage, BEST_KEY),
            recent: load_list(storage, RECENT_KEY),
        };
        log::info!(
            "score ledger loaded ({} best, {} recent)",
            ledger.best.len(),
            ledger.recent.len()
        );
        ledger
    }

    /// Write both lists back to the store
    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        let best = serde_json::to_string(&self.best).unwrap_or_default();
        let recent = serde_json::to_string(&self.recent).unwrap_or_default();
        storage.set_item(BEST_KEY, &best)?;
        storage.set_item(RECENT_KEY, &recent)?;
        Ok(())
    }

    /// Record a finished session's score in both lists
    pub fn record_game_end(&mut self, score: u32) {
        self.recent.insert(0, score);
        self.recent.truncate(MAX_SAVED_SCORES);

        self.best.push(score);
        self.best.sort_unstable_by(|a, b| b.cmp(a));
        self.best.truncate(MAX_SAVED_SCORES);
    }

    pub fn top_score(&self) -> Option<u32> {
        self.best.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty() && self.recent.is_empty()
    }
}

fn load_list(storage: &dyn Storage, key: &str) -> Vec<u32> {
    match storage.get_item(key) {
        Some(json) => match serde_json::from_str::<Vec<u32>>(&json) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("discarding corrupt score list under {key}: {err}");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}
