//! Arena Survival - a real-time arena survival simulation
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player physics, enemy AI, collisions, wave director)
//! - `settings`: Runtime configuration for the host driver
//!
//! Rendering, input capture and UI chrome are external: the host feeds a
//! [`sim::TickInput`] and elapsed time into [`sim::tick`] each frame and draws
//! whatever [`sim::GameState::snapshot`] reports.

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Base arena size (Endless/Training start, and the reset size)
    pub const BASE_WORLD_WIDTH: f32 = 700.0;
    pub const BASE_WORLD_HEIGHT: f32 = 450.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 70.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Speed gained per frame while thrusting
    pub const PLAYER_ACCEL: f32 = 0.2;
    /// Fraction of speed lost per coasting frame
    pub const PLAYER_FRICTION: f32 = 0.05;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    /// Radians per frame
    pub const PLAYER_TURN_SPEED: f32 = 0.06;

    /// Enemy body (all archetypes share it)
    pub const ENEMY_WIDTH: f32 = 60.0;
    pub const ENEMY_HEIGHT: f32 = 35.0;
    pub const FAST_SPEED: f32 = 3.0;
    pub const CHARGER_SPEED: f32 = 2.6;
    pub const SHOOTER_SPEED: f32 = 1.8;
    pub const EXPLODER_SPEED: f32 = 1.7;

    /// Charger pursues at this fraction of its base speed
    pub const CHARGER_PURSUIT_FACTOR: f32 = 0.8;
    /// Charger only commits to a charge from farther than this
    pub const CHARGER_MIN_CHARGE_DIST: f32 = 120.0;
    pub const CHARGER_CHARGE_SPEED: f32 = 6.0;
    /// Seconds
    pub const CHARGER_CHARGE_DURATION: f32 = 0.7;
    pub const CHARGER_COOLDOWN_MIN: f32 = 3.0;
    pub const CHARGER_COOLDOWN_MAX: f32 = 5.0;

    pub const SHOOTER_STANDOFF: f32 = 200.0;
    pub const SHOOTER_DEAD_BAND: f32 = 30.0;
    pub const SHOOTER_COOLDOWN_MIN: f32 = 1.5;
    pub const SHOOTER_COOLDOWN_MAX: f32 = 2.5;

    pub const EXPLODER_LUNGE_RANGE: f32 = 130.0;
    pub const EXPLODER_NEAR_BONUS: f32 = 2.5;
    pub const EXPLODER_FAR_BONUS: f32 = 0.8;

    /// Projectiles
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 4.0;
    /// Projectiles are culled once this far outside the world
    pub const PROJECTILE_CULL_MARGIN: f32 = 20.0;

    /// Obstacles (wide orientation; tall swaps the two)
    pub const OBSTACLE_LONG: f32 = 160.0;
    pub const OBSTACLE_SHORT: f32 = 30.0;
    pub const OBSTACLE_SPEED: f32 = 1.5;
    /// Keep-out margin when placing a new obstacle
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 40.0;
    /// Inset of the patrol range from the world edge
    pub const OBSTACLE_PATROL_MARGIN: f32 = 10.0;

    /// Enemy centers closer than this get pushed apart
    pub const ENEMY_MIN_SEPARATION: f32 = 70.0;

    /// Spawn placement
    pub const SPAWN_MIN_PLAYER_DIST: f32 = 220.0;
    /// Candidate positions are drawn from [0, size - margin)
    pub const SPAWN_EDGE_MARGIN: f32 = 80.0;
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;
    /// Seconds between a spawn warning and the enemy becoming solid
    pub const SPAWN_WARNING_DELAY: f32 = 1.0;

    /// Countdown: each numeric label is shown this long
    pub const COUNTDOWN_STEP: f32 = 0.7;
    pub const COUNTDOWN_FROM: u32 = 3;
    /// "GO!" hold before the run starts
    pub const COUNTDOWN_GO_HOLD: f32 = 0.5;

    /// Endless arena growth
    pub const ENDLESS_GROW_INTERVAL: f32 = 5.0;
    pub const ENDLESS_GROW_STEP: f32 = 50.0;
    /// Growth stops once the width exceeds this
    pub const ENDLESS_MAX_WIDTH: f32 = 2000.0;
    /// Spawn probability per second of frame time
    pub const ENDLESS_SPAWN_RATE: f32 = 0.5;

    /// Training caps
    pub const TRAINING_MAX_ENEMIES: usize = 20;
    pub const TRAINING_MAX_OBSTACLES: usize = 10;

    /// Charger velocity is authored per 1/60 s frame
    pub const REFERENCE_FPS: f32 = 60.0;
}

/// Error types for configuration and host-side failures
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A setting is out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Mode name outside the four known modes
    #[error("Unknown mode: {0:?} (expected classic, chaos, endless or training)")]
    UnknownMode(String),

    /// A simulation command was rejected
    #[error(transparent)]
    Command(#[from] sim::CommandError),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, Error>;
