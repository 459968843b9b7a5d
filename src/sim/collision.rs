//! Enemy separation and player hazard contact
//!
//! Separation is a positional correction only: it never touches stored
//! speeds or charge velocities.

use super::geom::WorldBounds;
use super::projectile::first_hit;
use super::state::{Enemy, GameState};
use crate::consts::ENEMY_MIN_SEPARATION;

/// What the player touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Enemy { id: u32 },
    Projectile { id: u32 },
    Obstacle { id: u32 },
}

/// Push overlapping enemy pairs apart along their center line.
///
/// Each member of a pair closer than `min_dist` moves half the penetration
/// depth, then both are re-clamped. One pass over all unordered pairs.
/// Returns the number of pairs corrected.
pub fn separate_enemies(enemies: &mut [Enemy], bounds: &WorldBounds, min_dist: f32) -> usize {
    let mut corrected = 0;
    for i in 0..enemies.len() {
        for j in (i + 1)..enemies.len() {
            let (head, tail) = enemies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let delta = b.center() - a.center();
            let len = delta.length();
            let dist = if len > 0.0 { len } else { 1.0 };
            if dist >= min_dist {
                continue;
            }

            let push = delta / dist * ((min_dist - dist) * 0.5);
            a.pos = bounds.clamp_position(a.pos - push, a.size);
            b.pos = bounds.clamp_position(b.pos + push, b.size);
            corrected += 1;
        }
    }
    corrected
}

/// First hazard overlapping the player: enemies, then projectiles, then obstacles.
pub fn find_hazard(state: &GameState) -> Option<Hazard> {
    let player = state.player.rect();

    if let Some(e) = state.enemies.iter().find(|e| e.rect().overlaps(&player)) {
        return Some(Hazard::Enemy { id: e.id });
    }
    if let Some(p) = first_hit(&state.projectiles, &player) {
        return Some(Hazard::Projectile { id: p.id });
    }
    state
        .obstacles
        .iter()
        .find(|o| o.rect().overlaps(&player))
        .map(|o| Hazard::Obstacle { id: o.id })
}

/// Run the collision stage for one frame.
///
/// Returns the hazard that ended the run, if any. Training ignores contact.
pub fn resolve_collisions(state: &mut GameState) -> Option<Hazard> {
    let bounds = state.bounds;
    separate_enemies(&mut state.enemies, &bounds, ENEMY_MIN_SEPARATION);

    if state.mode == Some(super::state::Mode::Training) {
        return None;
    }
    find_hazard(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, Mode, Obstacle, Orientation, Projectile, RunPhase};
    use glam::Vec2;
    use proptest::prelude::*;

    fn enemy_at(id: u32, center: Vec2) -> Enemy {
        let mut e = Enemy::new(id, EnemyKind::Fast, Vec2::ZERO);
        e.pos = center - e.size * 0.5;
        e
    }

    #[test]
    fn test_overlapping_pair_pushed_to_min_distance() {
        let bounds = WorldBounds::new(2000.0, 2000.0);
        let mut enemies = vec![
            enemy_at(1, Vec2::new(500.0, 500.0)),
            enemy_at(2, Vec2::new(530.0, 500.0)),
        ];
        assert_eq!(separate_enemies(&mut enemies, &bounds, 70.0), 1);
        let d = enemies[0].center().distance(enemies[1].center());
        assert!((d - 70.0).abs() < 1e-3);
        // Symmetric push
        assert!((enemies[0].center().x - 480.0).abs() < 1e-3);
        assert!((enemies[1].center().x - 550.0).abs() < 1e-3);
    }

    #[test]
    fn test_distant_pair_untouched() {
        let bounds = WorldBounds::new(2000.0, 2000.0);
        let mut enemies = vec![
            enemy_at(1, Vec2::new(500.0, 500.0)),
            enemy_at(2, Vec2::new(600.0, 500.0)),
        ];
        assert_eq!(separate_enemies(&mut enemies, &bounds, 70.0), 0);
        assert_eq!(enemies[1].center(), Vec2::new(600.0, 500.0));
    }

    #[test]
    fn test_separation_keeps_speed_and_charge() {
        let bounds = WorldBounds::new(2000.0, 2000.0);
        let mut a = enemy_at(1, Vec2::new(500.0, 500.0));
        a.speed = 3.0;
        let mut enemies = vec![a, enemy_at(2, Vec2::new(510.0, 505.0))];
        separate_enemies(&mut enemies, &bounds, 70.0);
        assert_eq!(enemies[0].speed, 3.0);
    }

    #[test]
    fn test_training_ignores_contact() {
        let mut state = GameState::new(1);
        state.mode = Some(Mode::Training);
        state.phase = RunPhase::Running;
        let center = state.player.center();
        state.enemies.push(enemy_at(9, center));
        assert_eq!(resolve_collisions(&mut state), None);
    }

    #[test]
    fn test_hazard_kinds() {
        let mut state = GameState::new(1);
        state.mode = Some(Mode::Classic);
        let player = state.player.clone();
        assert_eq!(find_hazard(&state), None);

        state.obstacles.push(Obstacle::new(
            3,
            Orientation::Wide,
            player.pos,
            1.0,
            &state.bounds,
        ));
        assert_eq!(find_hazard(&state), Some(Hazard::Obstacle { id: 3 }));

        state.projectiles.push(Projectile {
            id: 4,
            pos: player.pos,
            size: Vec2::splat(10.0),
            vel: Vec2::ZERO,
        });
        assert_eq!(find_hazard(&state), Some(Hazard::Projectile { id: 4 }));

        state.enemies.push(enemy_at(5, player.center()));
        assert_eq!(find_hazard(&state), Some(Hazard::Enemy { id: 5 }));
    }

    proptest! {
        #[test]
        fn separated_pair_reaches_min_distance(
            ax in 300.0f32..700.0, ay in 300.0f32..700.0,
            dx in -60.0f32..60.0, dy in -60.0f32..60.0,
        ) {
            // Coincident centers have no push axis
            prop_assume!(dx.abs() > 0.01 || dy.abs() > 0.01);
            // Interior of a large world: no clamping residual
            let bounds = WorldBounds::new(2000.0, 2000.0);
            let mut enemies = vec![
                enemy_at(1, Vec2::new(ax, ay)),
                enemy_at(2, Vec2::new(ax + dx, ay + dy)),
            ];
            separate_enemies(&mut enemies, &bounds, 70.0);
            let d = enemies[0].center().distance(enemies[1].center());
            prop_assert!(d >= 70.0 - 1e-2);
            for e in &enemies {
                prop_assert!(bounds.contains(e.pos, e.size));
            }
        }
    }
}
