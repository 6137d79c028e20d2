//! The game engine: state machine, scheduled task handlers, difficulty
//!
//! `Game` owns the session for its lifetime. All mutation flows through the
//! transitions (`start`/`pause`/`resume`/`end`) and the scheduled tasks;
//! input handlers only set intent flags or apply a single clamped nudge.

use rand::Rng;
use thiserror::Error;

use super::collision::{rects_overlap, rects_overlap_scaled};
use super::difficulty::{target_spawn_interval, target_speed};
use super::scheduler::{Scheduler, TaskId};
use super::state::{GameEvent, GamePhase, GameState, Geometry, MoveIntent, Obstacle};
use crate::consts::MOVEMENT_PERIOD_MS;
use crate::highscores::ScoreLedger;
use crate::platform::Storage;
use crate::theme::Theme;
use crate::tuning::Tuning;

/// Errors that abort a start attempt
#[derive(Debug, Error)]
pub enum GameError {
    #[error("play area has no usable size ({width} x {height})")]
    InvalidPlayArea { width: f32, height: f32 },
    #[error("player width must be positive (got {width})")]
    InvalidPlayerGeometry { width: f32 },
}

/// Discrete input direction for `Game::nudge`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The engine: session state plus the scheduler, tuning, theme and ledger
pub struct Game {
    pub state: GameState,
    scheduler: Scheduler,
    geometry: Geometry,
    tuning: Tuning,
    theme: Theme,
    ledger: ScoreLedger,
    storage: Box<dyn Storage>,
    seed: u64,
    sessions: u64,
}

impl Game {
    /// Build an engine in `Idle`. The ledger is loaded from storage once,
    /// here; it is only written back at game over.
    pub fn new(
        geometry: Geometry,
        tuning: Tuning,
        theme: Theme,
        seed: u64,
        storage: Box<dyn Storage>,
    ) -> Self {
        let ledger = ScoreLedger::load(storage.as_ref());
        Self {
            state: GameState::new(geometry, &tuning, seed),
            scheduler: Scheduler::new(),
            geometry,
            tuning,
            theme,
            ledger,
            storage,
            seed,
            sessions: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Cosmetic only; takes effect for obstacles spawned from now on
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Start (or restart) a session. Valid from any phase.
    ///
    /// Fails without scheduling anything if the measured geometry is
    /// unusable; the previous session state is left untouched in that case.
    pub fn start(&mut self) -> Result<(), GameError> {
        let area = self.geometry.area;
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(GameError::InvalidPlayArea {
                width: area.width,
                height: area.height,
            });
        }
        if self.geometry.player_size.x <= 0.0 {
            return Err(GameError::InvalidPlayerGeometry {
                width: self.geometry.player_size.x,
            });
        }

        // Fresh session: score, speed, cadence, obstacles, player position
        self.sessions += 1;
        let session_seed = self.seed.wrapping_add(self.sessions);
        self.state = GameState::new(self.geometry, &self.tuning, session_seed);
        self.state.phase = GamePhase::Running;
        self.state.events.push(GameEvent::Started);

        // Movement registers first so that within one batch the obstacle
        // pass runs before any newly due spawn; a fresh obstacle is
        // observable at the top of the play area.
        self.scheduler.clear();
        self.scheduler.schedule(TaskId::Movement, MOVEMENT_PERIOD_MS);
        self.scheduler
            .schedule(TaskId::Spawn, self.tuning.base_spawn_interval_ms);
        if let Some(passive) = self.tuning.passive_score {
            self.scheduler.schedule(TaskId::Score, passive.period_ms);
        }
        self.scheduler.resume();

        log::info!(
            "session {} started ({}x{} area, spawn every {} ms)",
            self.sessions,
            area.width,
            area.height,
            self.tuning.base_spawn_interval_ms
        );
        Ok(())
    }

    /// Suspend ticks without clearing session state. `Running` only.
    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.scheduler.suspend();
        self.state.phase = GamePhase::Paused;
        self.state.events.push(GameEvent::Paused);
    }

    /// Restart ticks at the current (possibly escalated) speed and cadence.
    /// `Paused` only.
    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.scheduler.resume();
        self.state.phase = GamePhase::Running;
        self.state.events.push(GameEvent::Resumed);
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Freeze the session and commit the score to the ledger. Idempotent;
    /// valid from `Running` or `Paused`.
    pub fn end(&mut self) {
        match self.state.phase {
            GamePhase::Running | GamePhase::Paused => {}
            _ => return,
        }
        self.scheduler.suspend();
        self.state.phase = GamePhase::GameOver;
        self.state.intent = MoveIntent::default();

        let score = self.state.score;
        self.ledger.record_game_end(score);
        if let Err(err) = self.ledger.save(self.storage.as_ref()) {
            // In-memory ledger stays authoritative for this process
            log::warn!("score ledger not persisted: {err}");
        }
        self.state.events.push(GameEvent::GameOver { score });
        log::info!("game over at score {score}");
    }

    /// Equivalent to `start()` from `GameOver`
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.start()
    }

    /// Smooth input model: hold/release a direction flag
    pub fn set_move_left(&mut self, held: bool) {
        self.state.intent.left = held;
    }

    pub fn set_move_right(&mut self, held: bool) {
        self.state.intent.right = held;
    }

    /// Discrete input model: one immediate clamped step. `Running` only.
    pub fn nudge(&mut self, direction: Direction) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let dx = match direction {
            Direction::Left => -self.state.player.step,
            Direction::Right => self.state.player.step,
        };
        let width = self.state.area.width;
        self.state.player.shift(dx, width);
    }

    /// Feed elapsed wall time into the scheduler and run the tasks that
    /// came due. Dispatch stops the moment the phase leaves `Running`
    /// (a collision mid-batch must not let later firings mutate the
    /// frozen session).
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let mut fired = Vec::new();
        self.scheduler.advance(elapsed_ms, &mut fired);
        for id in fired {
            if self.state.phase != GamePhase::Running {
                break;
            }
            match id {
                TaskId::Spawn => self.spawn_tick(),
                TaskId::Movement => self.movement_tick(),
                TaskId::Score => self.score_tick(),
            }
        }
    }

    /// Take the pending events for the rendering collaborator
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Spawn task: one obstacle at a uniformly random horizontal position
    fn spawn_tick(&mut self) {
        let area_width = self.state.area.width;
        let obstacle_width = self.state.obstacle_size.x;
        if obstacle_width <= 0.0 {
            log::warn!("skipping spawn: obstacle width {obstacle_width} is not positive");
            return;
        }
        let max_left = area_width - obstacle_width;
        if max_left < 0.0 {
            log::warn!(
                "skipping spawn: obstacle width {obstacle_width} exceeds play area width {area_width}"
            );
            return;
        }

        let x = self.state.rng.random_range(0.0..=max_left);
        let sprite_count = self.theme.sprites().len() as u32;
        let sprite = self.state.rng.random_range(0..sprite_count) as u8;
        let id = self.state.next_entity_id();
        self.state.obstacles.push(Obstacle {
            id,
            x,
            y: 0.0,
            width: obstacle_width,
            height: self.state.obstacle_size.y,
            sprite,
        });
        self.state
            .events
            .push(GameEvent::ObstacleSpawned { id, x, sprite });
    }

    /// Movement task: one player step, then one pass over all obstacles.
    ///
    /// The pass runs newest-first so removal is safe mid-iteration. Each
    /// obstacle is collision-checked before it moves; a hit ends the
    /// session immediately and the rest of the pass is abandoned, so the
    /// collision always wins over off-screen pruning within a tick.
    fn movement_tick(&mut self) {
        let area_width = self.state.area.width;
        let dx = self.state.intent.dx(self.state.player.step);
        if dx != 0.0 {
            self.state.player.shift(dx, area_width);
        }
        self.state.time_ticks += 1;

        let player_rect = self.state.player.rect(&self.state.area);
        let area_height = self.state.area.height;

        let mut i = self.state.obstacles.len();
        while i > 0 {
            i -= 1;
            let rect = self.state.obstacles[i].rect();
            let hit = match self.tuning.hitbox_scale {
                Some(scale) => rects_overlap_scaled(&player_rect, &rect, scale),
                None => rects_overlap(&player_rect, &rect),
            };
            if hit {
                self.end();
                return;
            }

            let speed = self.state.speed;
            let obstacle = &mut self.state.obstacles[i];
            obstacle.y += speed;
            if obstacle.y > area_height {
                let removed = self.state.obstacles.remove(i);
                self.state
                    .events
                    .push(GameEvent::ObstacleRemoved { id: removed.id });
                let points = self.tuning.score_per_dodge;
                if points > 0 {
                    self.award(points);
                }
            }
        }
    }

    /// Score task: passive accrual (rush variant)
    fn score_tick(&mut self) {
        if let Some(passive) = self.tuning.passive_score {
            self.award(passive.increment);
        }
    }

    /// Raise the score and re-derive difficulty from it
    fn award(&mut self, points: u32) {
        self.state.score = self.state.score.saturating_add(points);
        self.state
            .events
            .push(GameEvent::ScoreChanged(self.state.score));

        let speed = target_speed(&self.tuning, self.state.score);
        if speed > self.state.speed {
            self.state.speed = speed;
            self.state.events.push(GameEvent::SpeedChanged(speed));
            log::debug!("speed raised to {speed} at score {}", self.state.score);
        }

        let interval = target_spawn_interval(&self.tuning, self.state.score);
        if interval < self.state.spawn_interval_ms {
            self.state.spawn_interval_ms = interval;
            self.scheduler.reschedule(TaskId::Spawn, interval);
            self.state
                .events
                .push(GameEvent::SpawnIntervalChanged(interval));
            log::debug!("spawn interval tightened to {interval} ms");
        }
    }
}
