//! Data-driven game balance
//!
//! The game family shipped three near-identical variants that differ only in
//! tuning: scoring model, escalation thresholds, hitbox forgiveness, and
//! whether a pause key exists. Those differences live here as data so the
//! engine stays variant-agnostic.

use serde::{Deserialize, Serialize};

/// Passive score accrual (rush variant): a fixed increment on a fixed cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassiveScore {
    pub period_ms: u64,
    pub increment: u32,
}

/// The game variants, selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    #[default]
    Classic,
    Rush,
    Deluxe,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Classic, Self::Rush, Self::Deluxe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Rush => "Rush",
            Variant::Deluxe => "Deluxe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "rush" => Some(Variant::Rush),
            "deluxe" => Some(Variant::Deluxe),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        match self {
            Variant::Classic => Tuning::classic(),
            Variant::Rush => Tuning::rush(),
            Variant::Deluxe => Tuning::deluxe(),
        }
    }
}

/// Everything that differs between variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Horizontal displacement per player step
    pub player_step: f32,

    /// Obstacle fall distance per movement tick
    pub base_speed: f32,
    /// Speed added per difficulty step (ignored when `speed_step_score` is 0)
    pub speed_increment: f32,
    /// Score per speed step; 0 means speed never escalates
    pub speed_step_score: u32,
    pub max_speed: f32,

    /// Starting spawn cadence
    pub base_spawn_interval_ms: u64,
    /// Interval removed per difficulty step (ignored when `spawn_step_score` is 0)
    pub spawn_decrement_ms: u64,
    /// Score per cadence step; 0 means the cadence never tightens
    pub spawn_step_score: u32,
    pub min_spawn_interval_ms: u64,

    /// Points awarded when an obstacle leaves the play area unscathed
    pub score_per_dodge: u32,
    /// Timed score accrual, if this variant has it
    pub passive_score: Option<PassiveScore>,

    /// Hitbox shrink scale in (0, 1); `None` uses the full visual bounds
    pub hitbox_scale: Option<f32>,

    /// Whether the front end offers a pause key
    pub pause_enabled: bool,
}

impl Tuning {
    /// The original game: fixed speed, fixed cadence, score per dodge
    pub fn classic() -> Self {
        Self {
            player_step: 15.0,
            base_speed: 3.0,
            speed_increment: 0.0,
            speed_step_score: 0,
            max_speed: 3.0,
            base_spawn_interval_ms: 1200,
            spawn_decrement_ms: 0,
            spawn_step_score: 0,
            min_spawn_interval_ms: 1200,
            score_per_dodge: 1,
            passive_score: None,
            hitbox_scale: None,
            pause_enabled: false,
        }
    }

    /// Survival variant: score ticks up over time and drives both speed and
    /// spawn cadence (a step every 500 points)
    pub fn rush() -> Self {
        Self {
            player_step: 15.0,
            base_speed: 3.0,
            speed_increment: 0.5,
            speed_step_score: 500,
            max_speed: 8.0,
            base_spawn_interval_ms: 1200,
            spawn_decrement_ms: 100,
            spawn_step_score: 500,
            min_spawn_interval_ms: 400,
            score_per_dodge: 0,
            passive_score: Some(PassiveScore {
                period_ms: 100,
                increment: 1,
            }),
            hitbox_scale: None,
            pause_enabled: true,
        }
    }

    /// Themed variant: per-dodge scoring with a speed step every 5 dodges and
    /// forgiving hitboxes
    pub fn deluxe() -> Self {
        Self {
            player_step: 15.0,
            base_speed: 3.0,
            speed_increment: 0.5,
            speed_step_score: 5,
            max_speed: 8.0,
            base_spawn_interval_ms: 1200,
            spawn_decrement_ms: 0,
            spawn_step_score: 0,
            min_spawn_interval_ms: 1200,
            score_per_dodge: 1,
            passive_score: None,
            hitbox_scale: Some(0.55),
            pause_enabled: true,
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}
