//! Session state and core entity types
//!
//! The session is owned exclusively by the engine; input handlers only ever
//! set intent flags here, never positions or score.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Created but never started
    Idle,
    /// Active gameplay, tasks firing
    Running,
    /// Tasks suspended, session state intact
    Paused,
    /// Session frozen, score committed
    GameOver,
}

/// The bounded region the player and obstacles move in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

/// Geometry measured once at session start from the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub area: PlayArea,
    pub player_size: Vec2,
    pub obstacle_size: Vec2,
}

impl Geometry {
    /// The dimensions the original game family shipped with
    pub fn standard() -> Self {
        Self {
            area: PlayArea {
                width: PLAY_AREA_WIDTH,
                height: PLAY_AREA_HEIGHT,
            },
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            obstacle_size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        }
    }
}

/// The player-controlled element, clamped to the play-area width
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Horizontal position of the left edge
    pub left: f32,
    pub width: f32,
    pub height: f32,
    /// Displacement per step
    pub step: f32,
}

impl Player {
    /// Apply a horizontal displacement, silently clamped to
    /// `[0, area_width - width]`
    pub fn shift(&mut self, dx: f32, area_width: f32) {
        let max_left = (area_width - self.width).max(0.0);
        self.left = (self.left + dx).max(0.0).min(max_left);
    }

    /// Centre horizontally, matching the original integer centring
    pub fn recenter(&mut self, area_width: f32) {
        self.left = ((area_width - self.width) / 2.0).floor().max(0.0);
    }

    /// Collision rectangle; the player sits just above the bottom edge
    pub fn rect(&self, area: &PlayArea) -> Rect {
        let top = area.height - PLAYER_BOTTOM_MARGIN - self.height;
        Rect::from_ltwh(self.left, top, self.width, self.height)
    }
}

/// A transient falling entity
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: u32,
    /// Horizontal position, fixed at spawn
    pub x: f32,
    /// Vertical position of the top edge; grows every movement tick
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Cosmetic index into the active theme's sprite table
    pub sprite: u8,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::from_ltwh(self.x, self.y, self.width, self.height)
    }
}

/// Held-direction flags; opposite flags cancel each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Net displacement for one movement tick
    pub fn dx(&self, step: f32) -> f32 {
        match (self.left, self.right) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0.0,
        }
    }
}

/// Observable outputs for the rendering collaborator, drained each frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    ObstacleSpawned { id: u32, x: f32, sprite: u8 },
    ObstacleRemoved { id: u32 },
    ScoreChanged(u32),
    SpeedChanged(f32),
    SpawnIntervalChanged(u64),
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub area: PlayArea,
    pub player: Player,
    pub obstacle_size: Vec2,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Non-negative, monotonic within a session
    pub score: u32,
    /// Fall distance per movement tick; never regresses within a session
    pub speed: f32,
    /// Spawn cadence; never rises within a session
    pub spawn_interval_ms: u64,
    pub intent: MoveIntent,
    /// Movement ticks elapsed this session
    pub time_ticks: u64,
    /// Pending events for the rendering collaborator
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(geometry: Geometry, tuning: &Tuning, seed: u64) -> Self {
        let mut player = Player {
            left: 0.0,
            width: geometry.player_size.x,
            height: geometry.player_size.y,
            step: tuning.player_step,
        };
        player.recenter(geometry.area.width);
        Self {
            phase: GamePhase::Idle,
            area: geometry.area,
            player,
            obstacle_size: geometry.obstacle_size,
            obstacles: Vec::new(),
            score: 0,
            speed: tuning.base_speed,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
            intent: MoveIntent::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
