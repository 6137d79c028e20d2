//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Scheduler-driven ticks only, advanced by explicit elapsed time
//! - Seeded RNG only
//! - No rendering, terminal, or wall-clock dependencies
//!
//! The front end observes state after each advance; it never mutates spatial
//! state except through the engine's own methods.

pub mod collision;
pub mod difficulty;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap, rects_overlap_scaled};
pub use difficulty::{target_spawn_interval, target_speed};
pub use scheduler::{Scheduler, TaskId};
pub use state::{
    GameEvent, GamePhase, GameState, Geometry, MoveIntent, Obstacle, PlayArea, Player,
};
pub use tick::{Direction, Game, GameError};
