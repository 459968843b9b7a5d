//! Wave/mode director
//!
//! Owns the per-mode rules table, enemy and obstacle spawning, arena sizing,
//! wave and Endless timers, the countdown, game over and the operator
//! commands Training exposes.

use glam::Vec2;
use rand::Rng;

use super::collision::Hazard;
use super::geom::{WorldBounds, clamp};
use super::schedule::DeferredEvent;
use super::state::{
    CountdownLabel, Enemy, EnemyKind, GameState, Mode, Obstacle, Orientation, RunPhase,
    SpawnWarning,
};
use crate::consts::*;

/// Rejection of an operator command. State is left unchanged.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    #[error("Enemy limit reached in training mode ({cap})")]
    EnemyCapReached { cap: usize },

    #[error("Obstacle limit reached in training mode ({cap})")]
    ObstacleCapReached { cap: usize },

    #[error("Command only available in training mode")]
    NotInTraining,

    #[error("Run is over; restart before choosing a mode")]
    RunOver,
}

/// Discrete-wave rules for Classic and Chaos
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveRules {
    /// Enemies per wave = `enemy_base + floor(wave * enemy_rate_tenths / 10)`
    pub enemy_base: u32,
    pub enemy_rate_tenths: u32,
    /// Seconds for wave 1
    pub base_duration: f32,
    /// Seconds added per later wave
    pub duration_growth: f32,
    /// First wave that has obstacles
    pub obstacles_from_wave: u32,
    pub arena_grows: bool,
}

impl WaveRules {
    /// Enemy count for a 1-based wave index
    pub fn enemy_count(&self, wave: u32) -> u32 {
        self.enemy_base + wave * self.enemy_rate_tenths / 10
    }

    pub fn duration(&self, wave: u32) -> f32 {
        self.base_duration + wave.saturating_sub(1) as f32 * self.duration_growth
    }

    /// Obstacle count for a 1-based wave index (0 before the threshold, at most 4)
    pub fn obstacle_count(&self, wave: u32) -> u32 {
        if wave < self.obstacles_from_wave {
            0
        } else {
            (1 + (wave - self.obstacles_from_wave) / 2).min(4)
        }
    }

    /// Arena size for a 1-based wave index
    pub fn bounds(&self, wave: u32) -> WorldBounds {
        if !self.arena_grows {
            return WorldBounds::base();
        }
        let steps = wave.saturating_sub(1) as f32;
        WorldBounds::new(
            clamp(BASE_WORLD_WIDTH + steps * 40.0, 1000.0, 1800.0),
            clamp(BASE_WORLD_HEIGHT + steps * 30.0, 450.0, 800.0),
        )
    }
}

/// How a mode populates the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawning {
    Waves(WaveRules),
    /// Random spawns over time, arena grows on a timer
    Continuous,
    /// Operator commands only
    Manual,
}

/// Fixed per-mode configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    pub mode: Mode,
    pub spawning: Spawning,
    pub countdown: bool,
    /// Hazard contact ends the run
    pub lethal: bool,
}

impl ModeConfig {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Classic => Self {
                mode,
                spawning: Spawning::Waves(WaveRules {
                    enemy_base: 1,
                    enemy_rate_tenths: 12,
                    base_duration: 30.0,
                    duration_growth: 5.0,
                    obstacles_from_wave: 3,
                    arena_grows: true,
                }),
                countdown: true,
                lethal: true,
            },
            Mode::Chaos => Self {
                mode,
                spawning: Spawning::Waves(WaveRules {
                    enemy_base: 2,
                    enemy_rate_tenths: 20,
                    base_duration: 20.0,
                    duration_growth: 3.0,
                    obstacles_from_wave: 2,
                    arena_grows: true,
                }),
                countdown: true,
                lethal: true,
            },
            Mode::Endless => Self {
                mode,
                spawning: Spawning::Continuous,
                countdown: true,
                lethal: true,
            },
            Mode::Training => Self {
                mode,
                spawning: Spawning::Manual,
                countdown: false,
                lethal: false,
            },
        }
    }

    pub fn wave_rules(&self) -> Option<&WaveRules> {
        match &self.spawning {
            Spawning::Waves(rules) => Some(rules),
            _ => None,
        }
    }

    /// Arena size on entering the mode
    pub fn initial_bounds(&self) -> WorldBounds {
        match &self.spawning {
            Spawning::Waves(rules) => rules.bounds(1),
            _ => WorldBounds::base(),
        }
    }
}

/// Archetype mix for a 1-based wave index
pub fn wave_archetype<R: Rng>(wave: u32, rng: &mut R) -> EnemyKind {
    match wave {
        0..=2 => EnemyKind::Fast,
        3 => {
            if rng.random::<f32>() < 0.6 {
                EnemyKind::Fast
            } else {
                EnemyKind::Charger
            }
        }
        4 => EnemyKind::ALL[rng.random_range(0..3)],
        _ => random_archetype(rng),
    }
}

/// Uniform over all four archetypes
pub fn random_archetype<R: Rng>(rng: &mut R) -> EnemyKind {
    EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())]
}

impl GameState {
    /// Config of the active mode
    pub fn mode_config(&self) -> Option<ModeConfig> {
        self.mode.map(ModeConfig::for_mode)
    }

    /// Enter `mode`. Rejected after game over until `restart`.
    ///
    /// Clears the world, re-centers the player and either starts the
    /// countdown or, for Training, starts running immediately.
    pub fn start_mode(&mut self, mode: Mode) -> Result<(), CommandError> {
        if self.phase == RunPhase::GameOver {
            log::debug!("Rejected start_mode({mode}): run is over");
            return Err(CommandError::RunOver);
        }
        let config = ModeConfig::for_mode(mode);
        self.advance_epoch();
        self.schedule.clear();

        self.mode = Some(mode);
        self.summary = None;
        self.countdown = None;
        self.clear_entities();
        self.wave_index = 0;
        self.wave_time_remaining = 0.0;
        self.endless_time = 0.0;
        self.endless_grow_timer = 0.0;
        self.bounds = config.initial_bounds();
        self.reset_player();

        log::info!(
            "Starting {} mode: arena {}x{}",
            mode,
            self.bounds.width,
            self.bounds.height
        );

        if let Some(rules) = config.wave_rules() {
            self.setup_wave(rules);
        }

        if config.countdown {
            self.begin_countdown();
        } else {
            self.phase = RunPhase::Running;
        }
        Ok(())
    }

    /// Advance to the next wave: clear, resize, re-time and repopulate.
    fn setup_wave(&mut self, rules: &WaveRules) {
        self.wave_index += 1;
        let wave = self.wave_index;

        // Anything still warning from the previous wave must not land in this one
        self.advance_epoch();
        self.schedule
            .retain(|e| !matches!(e, DeferredEvent::MaterializeEnemy { .. }));
        self.clear_entities();

        let bounds = rules.bounds(wave);
        if rules.arena_grows {
            self.bounds.grow_to(bounds.width, bounds.height);
        } else {
            self.bounds = bounds;
        }
        self.wave_time_remaining = rules.duration(wave);

        let enemy_count = rules.enemy_count(wave);
        for _ in 0..enemy_count {
            let kind = wave_archetype(wave, &mut self.rng);
            self.spawn_enemy_at_safe_position(kind, true);
        }

        let obstacle_count = rules.obstacle_count(wave);
        for _ in 0..obstacle_count {
            let orientation = self.random_orientation();
            self.spawn_obstacle(orientation);
        }

        log::info!(
            "Wave {}: arena {}x{}, {} enemies, {} obstacles, {:.0}s",
            wave,
            self.bounds.width,
            self.bounds.height,
            enemy_count,
            obstacle_count,
            self.wave_time_remaining
        );
    }

    /// Show "3", "2", "1", "GO!" and then start running.
    fn begin_countdown(&mut self) {
        self.phase = RunPhase::CountingDown;
        self.countdown = Some(CountdownLabel::Number(COUNTDOWN_FROM));

        let epoch = self.epoch;
        let mut at = self.clock;
        for n in (1..COUNTDOWN_FROM).rev() {
            at += COUNTDOWN_STEP as f64;
            self.schedule
                .push(at, epoch, DeferredEvent::CountdownStep(CountdownLabel::Number(n)));
        }
        at += COUNTDOWN_STEP as f64;
        self.schedule
            .push(at, epoch, DeferredEvent::CountdownStep(CountdownLabel::Go));
        at += COUNTDOWN_GO_HOLD as f64;
        self.schedule.push(at, epoch, DeferredEvent::CountdownFinished);
    }

    /// Pick a position at least `SPAWN_MIN_PLAYER_DIST` from the player.
    ///
    /// Rejection sampling, capped; on exhaustion the farthest candidate wins.
    pub fn safe_spawn_position(&mut self) -> Vec2 {
        let span = Vec2::new(
            (self.bounds.width - SPAWN_EDGE_MARGIN).max(0.0),
            (self.bounds.height - SPAWN_EDGE_MARGIN).max(0.0),
        );
        let player = self.player.pos;

        let mut best = Vec2::ZERO;
        let mut best_dist = f32::NEG_INFINITY;
        for _ in 0..SPAWN_MAX_ATTEMPTS {
            let candidate = Vec2::new(
                self.rng.random::<f32>() * span.x,
                self.rng.random::<f32>() * span.y,
            );
            let dist = candidate.distance(player);
            if dist >= SPAWN_MIN_PLAYER_DIST {
                return candidate;
            }
            if dist > best_dist {
                best = candidate;
                best_dist = dist;
            }
        }

        log::warn!(
            "No spawn point {} away from the player after {} attempts; using {:.0} away",
            SPAWN_MIN_PLAYER_DIST,
            SPAWN_MAX_ATTEMPTS,
            best_dist
        );
        best
    }

    /// Spawn an enemy, optionally behind a warning marker and delay.
    fn spawn_enemy_at_safe_position(&mut self, kind: EnemyKind, with_warning: bool) {
        let pos = self.safe_spawn_position();
        if with_warning {
            self.warnings.push(SpawnWarning {
                pos,
                remaining: SPAWN_WARNING_DELAY,
            });
            let fire_at = self.clock + SPAWN_WARNING_DELAY as f64;
            self.schedule
                .push(fire_at, self.epoch, DeferredEvent::MaterializeEnemy { kind, pos });
            log::debug!("Warning: {} at ({:.0}, {:.0})", kind.name(), pos.x, pos.y);
        } else {
            self.materialize_enemy(kind, pos);
        }
    }

    fn materialize_enemy(&mut self, kind: EnemyKind, pos: Vec2) {
        let id = self.next_entity_id();
        let mut enemy = Enemy::new(id, kind, pos);
        enemy.pos = self.bounds.clamp_position(enemy.pos, enemy.size);
        log::debug!("Spawned {} #{}", kind.name(), id);
        self.enemies.push(enemy);
    }

    fn random_orientation(&mut self) -> Orientation {
        if self.rng.random_bool(0.5) {
            Orientation::Wide
        } else {
            Orientation::Tall
        }
    }

    fn spawn_obstacle(&mut self, orientation: Orientation) {
        let size = orientation.size();
        let margin = OBSTACLE_SPAWN_MARGIN;
        let span = Vec2::new(
            (self.bounds.width - size.x - margin * 2.0).max(0.0),
            (self.bounds.height - size.y - margin * 2.0).max(0.0),
        );
        let pos = Vec2::new(
            self.rng.random::<f32>() * span.x + margin,
            self.rng.random::<f32>() * span.y + margin,
        );
        let sign = if self.rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let id = self.next_entity_id();
        let bounds = self.bounds;
        self.obstacles
            .push(Obstacle::new(id, orientation, pos, sign, &bounds));
    }

    /// Operator command: spawn one enemy immediately (Training only).
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> Result<(), CommandError> {
        self.require_training()?;
        if self.enemies.len() >= TRAINING_MAX_ENEMIES {
            let err = CommandError::EnemyCapReached {
                cap: TRAINING_MAX_ENEMIES,
            };
            log::debug!("Rejected spawn_enemy: {err}");
            return Err(err);
        }
        self.spawn_enemy_at_safe_position(kind, false);
        Ok(())
    }

    /// Operator command: add one obstacle of random orientation (Training only).
    pub fn add_obstacle(&mut self) -> Result<(), CommandError> {
        self.require_training()?;
        if self.obstacles.len() >= TRAINING_MAX_OBSTACLES {
            let err = CommandError::ObstacleCapReached {
                cap: TRAINING_MAX_OBSTACLES,
            };
            log::debug!("Rejected add_obstacle: {err}");
            return Err(err);
        }
        let orientation = self.random_orientation();
        self.spawn_obstacle(orientation);
        Ok(())
    }

    /// Operator command: remove every enemy, projectile, obstacle and
    /// pending enemy spawn. The countdown, if any, is left alone.
    ///
    /// Unlike the other operator commands this works in every mode.
    pub fn clear_all(&mut self) {
        self.clear_entities();
        self.schedule
            .retain(|e| !matches!(e, DeferredEvent::MaterializeEnemy { .. }));
        log::debug!("Cleared all entities");
    }

    /// Operator command: back to mode selection with an empty world.
    pub fn restart(&mut self) {
        self.advance_epoch();
        self.schedule.clear();
        self.mode = None;
        self.phase = RunPhase::NotStarted;
        self.countdown = None;
        self.summary = None;
        self.clear_entities();
        self.wave_index = 0;
        self.wave_time_remaining = 0.0;
        self.endless_time = 0.0;
        self.endless_grow_timer = 0.0;
        self.bounds = WorldBounds::base();
        self.reset_player();
        log::info!("Restarted");
    }

    fn require_training(&self) -> Result<(), CommandError> {
        if self.mode == Some(Mode::Training) {
            Ok(())
        } else {
            log::debug!("Rejected training command in {:?}", self.mode);
            Err(CommandError::NotInTraining)
        }
    }

    /// End the run after hazard contact. No-op in Training or when not running.
    ///
    /// Returns true if the run actually ended.
    pub fn game_over(&mut self, hazard: Hazard) -> bool {
        let Some(config) = self.mode_config() else {
            return false;
        };
        if !config.lethal || self.phase != RunPhase::Running {
            return false;
        }

        self.phase = RunPhase::GameOver;
        self.advance_epoch();
        self.schedule.clear();
        self.warnings.clear();

        let summary = if config.mode == Mode::Endless {
            format!("You survived for {:.1} seconds.", self.endless_time)
        } else {
            format!("You reached wave {}.", self.wave_index)
        };
        log::info!("Game over ({hazard:?}): {summary}");
        self.summary = Some(summary);
        true
    }

    /// Timer service: runs every tick, running or not. Advances the host
    /// clock, ages warning markers and fires due deferred events.
    pub(crate) fn advance_timers(&mut self, dt: f32) {
        self.clock += dt as f64;

        self.warnings.retain_mut(|w| {
            w.remaining -= dt;
            w.remaining > 0.0
        });

        for (epoch, event) in self.schedule.drain_due(self.clock) {
            if epoch != self.epoch {
                log::debug!("Dropped stale {event:?} (epoch {epoch} != {})", self.epoch);
                continue;
            }
            match event {
                DeferredEvent::MaterializeEnemy { kind, pos } => self.materialize_enemy(kind, pos),
                DeferredEvent::CountdownStep(label) => self.countdown = Some(label),
                DeferredEvent::CountdownFinished => {
                    self.countdown = None;
                    if self.phase == RunPhase::CountingDown {
                        self.phase = RunPhase::Running;
                        log::info!("Go!");
                    }
                }
            }
        }
    }

    /// Per-frame director bookkeeping: wave countdown, Endless growth and spawns.
    pub(crate) fn advance_director(&mut self, dt: f32) {
        let Some(config) = self.mode_config() else {
            return;
        };
        match config.spawning {
            Spawning::Waves(rules) => {
                self.wave_time_remaining -= dt;
                if self.wave_time_remaining <= 0.0 {
                    self.setup_wave(&rules);
                }
            }
            Spawning::Continuous => {
                self.endless_time += dt;
                self.endless_grow_timer += dt;

                if self.endless_grow_timer >= ENDLESS_GROW_INTERVAL
                    && self.bounds.width <= ENDLESS_MAX_WIDTH
                {
                    self.endless_grow_timer -= ENDLESS_GROW_INTERVAL;
                    let (w, h) = (
                        self.bounds.width + ENDLESS_GROW_STEP,
                        self.bounds.height + ENDLESS_GROW_STEP,
                    );
                    self.bounds.grow_to(w, h);
                    log::info!("Arena grew to {}x{}", self.bounds.width, self.bounds.height);
                }

                if self.rng.random::<f32>() < dt * ENDLESS_SPAWN_RATE {
                    let kind = random_archetype(&mut self.rng);
                    self.spawn_enemy_at_safe_position(kind, true);
                }
            }
            Spawning::Manual => {}
        }
    }
}
