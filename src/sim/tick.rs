//! Per-frame simulation step
//!
//! Core loop that advances one frame using the host's real elapsed time.

use super::collision::resolve_collisions;
use super::enemy::update_enemy;
use super::obstacle::update_obstacles;
use super::player::{KeyState, update_player};
use super::projectile::update_projectiles;
use super::state::GameState;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current key state (level-triggered)
    pub keys: KeyState,
}

/// Advance the game by one frame of `dt` seconds.
///
/// Deferred events (spawn warnings, countdown steps) fire first, between
/// frames. The frame step itself only runs while the run is `Running`, in
/// fixed order: player, enemies (which may fire), projectiles, obstacles,
/// collisions, then director bookkeeping.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.advance_timers(dt);

    if !state.is_running() {
        return;
    }

    let bounds = state.bounds;
    update_player(&mut state.player, &input.keys, &bounds, dt);

    let target = state.player.center();
    let mut fired = Vec::new();
    for enemy in &mut state.enemies {
        if let Some(shot) = update_enemy(enemy, target, &bounds, dt, &mut state.rng) {
            fired.push(shot);
        }
    }
    for mut shot in fired {
        shot.id = state.next_entity_id();
        state.projectiles.push(shot);
    }

    update_projectiles(&mut state.projectiles, &bounds);
    update_obstacles(&mut state.obstacles);

    if let Some(hazard) = resolve_collisions(state) {
        state.game_over(hazard);
        return;
    }

    state.advance_director(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, Mode, RunPhase};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn running(mode: Mode, seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_mode(mode).unwrap();
        // Countdown is 2.6s
        for _ in 0..170 {
            tick(&mut state, &TickInput::default(), DT);
            if state.is_running() {
                break;
            }
        }
        assert!(state.is_running());
        state
    }

    #[test]
    fn test_idle_state_does_nothing() {
        let mut state = GameState::new(1);
        let input = TickInput {
            keys: KeyState {
                forward: true,
                ..Default::default()
            },
        };
        let start = state.player.pos;
        for _ in 0..10 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.player.pos, start);
        assert_eq!(state.phase, RunPhase::NotStarted);
    }

    #[test]
    fn test_countdown_gates_frame_step() {
        let mut state = GameState::new(1);
        state.start_mode(Mode::Endless).unwrap();
        let input = TickInput {
            keys: KeyState {
                forward: true,
                ..Default::default()
            },
        };
        let start = state.player.pos;
        tick(&mut state, &input, DT);
        assert_eq!(state.player.pos, start);
        assert_eq!(state.endless_time, 0.0);
    }

    #[test]
    fn test_shooter_fire_lands_in_projectiles_same_frame() {
        let mut state = running(Mode::Training, 4);
        state.spawn_enemy(EnemyKind::Shooter).unwrap();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].id > 0);
    }

    #[test]
    fn test_contact_ends_run_once() {
        let mut state = running(Mode::Endless, 9);
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, EnemyKind::Fast, Vec2::ZERO);
        enemy.pos = state.player.pos;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::GameOver);
        let summary = state.summary.clone().expect("summary set");
        assert!(summary.starts_with("You survived for"));

        let frozen = state.endless_time;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.endless_time, frozen);
        assert_eq!(state.summary.as_deref(), Some(summary.as_str()));
    }

    #[test]
    fn test_wave_advances_when_timer_expires() {
        let mut state = running(Mode::Chaos, 2);
        // Keep the player safe: no hazards
        state.clear_all();
        state.wave_time_remaining = DT / 2.0;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.wave_index, 2);
        assert!((state.wave_time_remaining - 23.0).abs() < 1e-4);
        assert_eq!(state.warnings.len(), 6);
        assert_eq!(state.obstacles.len(), 1);
    }
}
