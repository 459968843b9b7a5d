//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]; systems borrow pieces of
//! it per frame. There is no global state, so independent simulations can
//! coexist (tests build dozens).

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Rect, WorldBounds};
use super::schedule::Schedule;
use crate::consts::*;

/// Run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No mode selected (initial state and after restart)
    NotStarted,
    /// Mode chosen, countdown in progress; frame step is gated off
    CountingDown,
    /// Active gameplay
    Running,
    /// Run ended; terminal until restart
    GameOver,
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Classic,
    Chaos,
    Endless,
    Training,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Classic, Mode::Chaos, Mode::Endless, Mode::Training];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Chaos => "Chaos",
            Mode::Endless => "Endless",
            Mode::Training => "Training",
        }
    }

    /// Modes that run discrete waves
    pub fn has_waves(&self) -> bool {
        matches!(self, Mode::Classic | Mode::Chaos)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "chaos" => Ok(Mode::Chaos),
            "endless" => Ok(Mode::Endless),
            "training" => Ok(Mode::Training),
            _ => Err(crate::Error::UnknownMode(s.to_string())),
        }
    }
}

/// Enemy archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Fast,
    Charger,
    Shooter,
    Exploder,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Fast,
        EnemyKind::Charger,
        EnemyKind::Shooter,
        EnemyKind::Exploder,
    ];

    pub fn base_speed(&self) -> f32 {
        match self {
            EnemyKind::Fast => FAST_SPEED,
            EnemyKind::Charger => CHARGER_SPEED,
            EnemyKind::Shooter => SHOOTER_SPEED,
            EnemyKind::Exploder => EXPLODER_SPEED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Fast => "fast",
            EnemyKind::Charger => "charger",
            EnemyKind::Shooter => "shooter",
            EnemyKind::Exploder => "exploder",
        }
    }
}

impl FromStr for EnemyKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(EnemyKind::Fast),
            "charger" => Ok(EnemyKind::Charger),
            "shooter" => Ok(EnemyKind::Shooter),
            "exploder" => Ok(EnemyKind::Exploder),
            other => Err(crate::Error::Config(format!("unknown enemy archetype {other:?}"))),
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Radians; unbounded
    pub heading: f32,
    /// Signed forward speed (units per frame)
    pub speed: f32,
    pub size: Vec2,
}

impl Player {
    /// Player at rest in the middle of `bounds`
    pub fn centered(bounds: &WorldBounds) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(bounds.width, bounds.height) * 0.5 - size * 0.5,
            heading: 0.0,
            speed: 0.0,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A committed charge: direction fixed at launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    /// Units per reference frame
    pub velocity: Vec2,
    /// Seconds left
    pub timer: f32,
}

/// Archetype-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Fast,
    Charger {
        /// Seconds until the next charge may start
        cooldown: f32,
        /// Some while charging
        charge: Option<Charge>,
    },
    Shooter {
        /// Seconds until the next shot
        fire_cooldown: f32,
    },
    Exploder,
}

impl Behavior {
    /// Fresh payload for a newly materialized enemy
    pub fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Fast => Behavior::Fast,
            EnemyKind::Charger => Behavior::Charger {
                cooldown: 0.0,
                charge: None,
            },
            EnemyKind::Shooter => Behavior::Shooter { fire_cooldown: 0.0 },
            EnemyKind::Exploder => Behavior::Exploder,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Fast => EnemyKind::Fast,
            Behavior::Charger { .. } => EnemyKind::Charger,
            Behavior::Shooter { .. } => EnemyKind::Shooter,
            Behavior::Exploder => EnemyKind::Exploder,
        }
    }
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub base_speed: f32,
    /// Speed used on the most recent frame
    pub speed: f32,
    pub behavior: Behavior,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            base_speed: kind.base_speed(),
            speed: 0.0,
            behavior: Behavior::for_kind(kind),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.behavior, Behavior::Charger { charge: Some(_), .. })
    }
}

/// A shot fired by a Shooter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per frame
    pub vel: Vec2,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Obstacle shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Wide and flat, patrols horizontally
    Wide,
    /// Tall and thin, patrols vertically
    Tall,
}

impl Orientation {
    pub fn size(&self) -> Vec2 {
        match self {
            Orientation::Wide => Vec2::new(OBSTACLE_LONG, OBSTACLE_SHORT),
            Orientation::Tall => Vec2::new(OBSTACLE_SHORT, OBSTACLE_LONG),
        }
    }
}

/// A patrolling wall segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Exactly one component is non-zero (±1)
    pub dir: Vec2,
    pub speed: f32,
    /// Patrol range for the top-left corner, fixed at spawn
    pub patrol_min: Vec2,
    pub patrol_max: Vec2,
}

impl Obstacle {
    /// Build an obstacle patrolling inside `bounds` with the standard inset.
    ///
    /// `sign` picks the initial travel direction along the active axis.
    pub fn new(id: u32, orientation: Orientation, pos: Vec2, sign: f32, bounds: &WorldBounds) -> Self {
        let size = orientation.size();
        let dir = match orientation {
            Orientation::Wide => Vec2::new(sign, 0.0),
            Orientation::Tall => Vec2::new(0.0, sign),
        };
        Self {
            id,
            pos,
            size,
            dir,
            speed: OBSTACLE_SPEED,
            patrol_min: Vec2::splat(OBSTACLE_PATROL_MARGIN),
            patrol_max: Vec2::new(
                bounds.width - size.x - OBSTACLE_PATROL_MARGIN,
                bounds.height - size.y - OBSTACLE_PATROL_MARGIN,
            ),
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.size.x >= self.size.y {
            Orientation::Wide
        } else {
            Orientation::Tall
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Marker shown where an enemy is about to materialize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWarning {
    pub pos: Vec2,
    /// Seconds until the marker disappears
    pub remaining: f32,
}

/// Countdown overlay text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownLabel {
    Number(u32),
    Go,
}

impl fmt::Display for CountdownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownLabel::Number(n) => write!(f, "{n}"),
            CountdownLabel::Go => f.write_str("GO!"),
        }
    }
}

/// Complete state of one simulation
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub seed: u64,
    /// Selected mode (None before selection and after restart)
    pub mode: Option<Mode>,
    pub phase: RunPhase,
    pub bounds: WorldBounds,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub warnings: Vec<SpawnWarning>,
    /// 1-based in Classic/Chaos, 0 otherwise
    pub wave_index: u32,
    /// Seconds left in the current wave
    pub wave_time_remaining: f32,
    /// Endless survival time
    pub endless_time: f32,
    /// Time accumulated toward the next Endless growth step
    pub endless_grow_timer: f32,
    pub countdown: Option<CountdownLabel>,
    /// End-of-run text, set on game over
    pub summary: Option<String>,
    /// Host time in seconds, advanced by every tick
    pub clock: f64,
    /// Bumped on every reset; deferred events from older epochs are dropped
    pub(crate) epoch: u64,
    pub(crate) schedule: Schedule,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle simulation (no mode selected) with the given seed
    pub fn new(seed: u64) -> Self {
        let bounds = WorldBounds::base();
        Self {
            seed,
            mode: None,
            phase: RunPhase::NotStarted,
            bounds,
            player: Player::centered(&bounds),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            warnings: Vec::new(),
            wave_index: 0,
            wave_time_remaining: 0.0,
            endless_time: 0.0,
            endless_grow_timer: 0.0,
            countdown: None,
            summary: None,
            clock: 0.0,
            epoch: 0,
            schedule: Schedule::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The frame step only runs in this state
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Deferred events not yet fired (stale ones included until they come due)
    pub fn pending_events(&self) -> usize {
        self.schedule.len()
    }

    /// Invalidate everything scheduled so far
    pub(crate) fn advance_epoch(&mut self) {
        self.epoch += 1;
    }

    /// Drop every live entity and marker
    pub fn clear_entities(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.obstacles.clear();
        self.warnings.clear();
    }

    /// Put the player back at rest in the middle of the current bounds
    pub fn reset_player(&mut self) {
        self.player = Player::centered(&self.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, RunPhase::NotStarted);
        assert!(state.mode.is_none());
        assert!(state.enemies.is_empty());
        assert_eq!(state.bounds, WorldBounds::base());
        assert!(!state.is_running());
    }

    #[test]
    fn test_player_centered() {
        let player = Player::centered(&WorldBounds::base());
        assert_eq!(player.pos, Vec2::new(315.0, 205.0));
        assert_eq!(player.center(), Vec2::new(350.0, 225.0));
        assert_eq!(player.speed, 0.0);
        assert_eq!(player.heading, 0.0);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Chaos".parse::<Mode>().unwrap(), Mode::Chaos);
        assert_eq!(" training ".parse::<Mode>().unwrap(), Mode::Training);
        assert!(matches!(
            "arcade".parse::<Mode>(),
            Err(crate::Error::UnknownMode(_))
        ));
    }

    #[test]
    fn test_behavior_tag_matches_kind() {
        for kind in EnemyKind::ALL {
            let enemy = Enemy::new(1, kind, Vec2::ZERO);
            assert_eq!(enemy.kind(), kind);
            assert_eq!(enemy.base_speed, kind.base_speed());
            assert!(!enemy.is_charging());
        }
    }

    #[test]
    fn test_obstacle_single_axis() {
        let bounds = WorldBounds::base();
        let wide = Obstacle::new(1, Orientation::Wide, Vec2::new(100.0, 100.0), -1.0, &bounds);
        assert_eq!(wide.dir, Vec2::new(-1.0, 0.0));
        assert_eq!(wide.patrol_max, Vec2::new(530.0, 410.0));
        assert_eq!(wide.orientation(), Orientation::Wide);

        let tall = Obstacle::new(2, Orientation::Tall, Vec2::new(100.0, 100.0), 1.0, &bounds);
        assert_eq!(tall.dir, Vec2::new(0.0, 1.0));
        assert_eq!(tall.orientation(), Orientation::Tall);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
