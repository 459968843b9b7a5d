//! Simulation module
//!
//! All gameplay logic lives here:
//! - One `GameState` per run, passed by reference to every system
//! - Seeded RNG only
//! - Fixed per-frame update order
//! - No rendering or platform dependencies

pub mod collision;
pub mod director;
pub mod enemy;
pub mod geom;
pub mod obstacle;
pub mod player;
pub mod projectile;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Hazard, find_hazard, resolve_collisions, separate_enemies};
pub use director::{CommandError, ModeConfig, Spawning, WaveRules};
pub use geom::{Rect, WorldBounds, rects_overlap};
pub use player::KeyState;
pub use schedule::DeferredEvent;
pub use snapshot::{EntityKind, EntityView, Hud, Snapshot};
pub use state::{
    Behavior, Charge, CountdownLabel, Enemy, EnemyKind, GameState, Mode, Obstacle, Orientation,
    Player, Projectile, RunPhase, SpawnWarning,
};
pub use tick::{TickInput, tick};
