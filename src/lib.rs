//! Skyfall - a falling-obstacle dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scheduler, collisions, game state)
//! - `tuning`: Data-driven game balance (one preset per game variant)
//! - `highscores`: Best/recent score ledger with persistence round-trip
//! - `platform`: Key-value storage abstraction (file-backed or in-memory)
//! - `theme`: Cosmetic obstacle sprite sets
//! - `settings`: Persisted user preferences

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod theme;
pub mod tuning;

pub use highscores::ScoreLedger;
pub use settings::Settings;
pub use theme::Theme;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Movement task cadence in milliseconds (player step + obstacle pass)
    pub const MOVEMENT_PERIOD_MS: u64 = 20;

    /// Play area dimensions (pixel-equivalent units)
    pub const PLAY_AREA_WIDTH: f32 = 400.0;
    pub const PLAY_AREA_HEIGHT: f32 = 500.0;

    /// Player defaults - sits near the bottom edge, moves horizontally
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Gap between the player's bottom edge and the play-area bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 30.0;

    /// Cap on both the best-scores and recent-scores lists
    pub const MAX_SAVED_SCORES: usize = 5;

    /// Catch-up cap per scheduler advance to prevent spiral of death
    pub const MAX_CATCHUP_FIRES: u32 = 8;
}
