//! Render-sink view of the simulation
//!
//! A flat, serializable picture of one frame. Renderers and the headless
//! driver read this; nothing here feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::geom::WorldBounds;
use super::state::{EnemyKind, GameState, Mode, Orientation, RunPhase};

/// What a drawable entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Enemy { archetype: EnemyKind },
    Projectile,
    Obstacle { orientation: Orientation },
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Chargers mid-charge (renderers highlight them)
    pub charging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub heading: f32,
    pub speed: f32,
}

/// Text the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub mode: String,
    pub wave: String,
    pub time: String,
    pub enemies: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub mode: Option<Mode>,
    pub bounds: WorldBounds,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
    /// Spawn warning markers
    pub warnings: Vec<Vec2>,
    pub hud: Hud,
    pub countdown: Option<String>,
    pub summary: Option<String>,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        let dash = || "-".to_string();
        let (wave, time) = match self.mode {
            Some(Mode::Classic | Mode::Chaos) => (
                self.wave_index.to_string(),
                format!("{:.1}", self.wave_time_remaining),
            ),
            Some(Mode::Endless) => (dash(), format!("{:.1}", self.endless_time)),
            Some(Mode::Training) | None => (dash(), dash()),
        };
        Hud {
            mode: self.mode.map(|m| m.name().to_string()).unwrap_or_else(dash),
            wave,
            time,
            enemies: self.enemies.len(),
        }
    }

    /// Everything a renderer needs for the current frame
    pub fn snapshot(&self) -> Snapshot {
        let enemies = self.enemies.iter().map(|e| EntityView {
            id: e.id,
            kind: EntityKind::Enemy { archetype: e.kind() },
            pos: e.pos,
            size: e.size,
            charging: e.is_charging(),
        });
        let projectiles = self.projectiles.iter().map(|p| EntityView {
            id: p.id,
            kind: EntityKind::Projectile,
            pos: p.pos,
            size: p.size,
            charging: false,
        });
        let obstacles = self.obstacles.iter().map(|o| EntityView {
            id: o.id,
            kind: EntityKind::Obstacle {
                orientation: o.orientation(),
            },
            pos: o.pos,
            size: o.size,
            charging: false,
        });

        Snapshot {
            phase: self.phase,
            mode: self.mode,
            bounds: self.bounds,
            player: PlayerView {
                pos: self.player.pos,
                size: self.player.size,
                heading: self.player.heading,
                speed: self.player.speed,
            },
            entities: enemies.chain(projectiles).chain(obstacles).collect(),
            warnings: self.warnings.iter().map(|w| w.pos).collect(),
            hud: self.hud(),
            countdown: self.countdown.map(|c| c.to_string()),
            summary: self.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_before_start() {
        let state = GameState::new(1);
        assert_eq!(
            state.hud(),
            Hud {
                mode: "-".into(),
                wave: "-".into(),
                time: "-".into(),
                enemies: 0,
            }
        );
    }

    #[test]
    fn test_hud_classic() {
        let mut state = GameState::new(1);
        state.start_mode(Mode::Classic).unwrap();
        let hud = state.hud();
        assert_eq!(hud.mode, "Classic");
        assert_eq!(hud.wave, "1");
        assert_eq!(hud.time, "30.0");
    }

    #[test]
    fn test_snapshot_lists_entities_and_serializes() {
        let mut state = GameState::new(1);
        state.start_mode(Mode::Training).unwrap();
        state.spawn_enemy(EnemyKind::Charger).unwrap();
        state.add_obstacle().unwrap();

        let snap = state.snapshot();
        assert_eq!(snap.phase, RunPhase::Running);
        assert_eq!(snap.entities.len(), 2);
        assert_eq!(
            snap.entities[0].kind,
            EntityKind::Enemy {
                archetype: EnemyKind::Charger
            }
        );
        assert!(snap.countdown.is_none());

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"type\":\"enemy\""));
        assert!(json.contains("\"Training\""));
    }

    #[test]
    fn test_snapshot_countdown_label() {
        let mut state = GameState::new(1);
        state.start_mode(Mode::Chaos).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.countdown.as_deref(), Some("3"));
        assert_eq!(snap.warnings.len(), 4);
    }
}
