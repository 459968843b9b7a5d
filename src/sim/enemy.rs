//! Enemy behavior engine
//!
//! Every enemy steers by the unit vector toward the player's center; what it
//! does with that vector depends on its archetype payload. Motion is per
//! frame except during a Charger's charge, which is scaled by `dt * 60`.

use glam::Vec2;
use rand::Rng;

use super::geom::{WorldBounds, direction_to};
use super::state::{Behavior, Charge, Enemy, Projectile};
use crate::consts::*;

/// Advance one enemy by one frame.
///
/// Returns the projectile a Shooter fired this frame (without an id; the
/// caller assigns one).
pub fn update_enemy<R: Rng>(
    enemy: &mut Enemy,
    target: Vec2,
    bounds: &WorldBounds,
    dt: f32,
    rng: &mut R,
) -> Option<Projectile> {
    let (dir, dist) = direction_to(enemy.center(), target);
    let mut fired = None;

    match &mut enemy.behavior {
        Behavior::Fast => {
            enemy.speed = enemy.base_speed;
            enemy.pos += dir * enemy.speed;
        }

        Behavior::Charger { cooldown, charge } => {
            *cooldown -= dt;
            match charge {
                Some(active) => {
                    enemy.pos += active.velocity * dt * REFERENCE_FPS;
                    active.timer -= dt;
                    if active.timer <= 0.0 {
                        *charge = None;
                    }
                }
                None => {
                    enemy.speed = enemy.base_speed * CHARGER_PURSUIT_FACTOR;
                    enemy.pos += dir * enemy.speed;
                    if *cooldown <= 0.0 && dist > CHARGER_MIN_CHARGE_DIST {
                        *charge = Some(Charge {
                            velocity: dir * CHARGER_CHARGE_SPEED,
                            timer: CHARGER_CHARGE_DURATION,
                        });
                        *cooldown = rng.random_range(CHARGER_COOLDOWN_MIN..CHARGER_COOLDOWN_MAX);
                    }
                }
            }
        }

        Behavior::Shooter { fire_cooldown } => {
            if dist > SHOOTER_STANDOFF + SHOOTER_DEAD_BAND {
                enemy.speed = enemy.base_speed;
                enemy.pos += dir * enemy.speed;
            } else if dist < SHOOTER_STANDOFF - SHOOTER_DEAD_BAND {
                enemy.speed = enemy.base_speed;
                enemy.pos -= dir * enemy.speed;
            }

            *fire_cooldown -= dt;
            if *fire_cooldown <= 0.0 {
                let origin = enemy.pos + enemy.size * 0.5;
                fired = Some(aimed_projectile(origin, target));
                *fire_cooldown = rng.random_range(SHOOTER_COOLDOWN_MIN..SHOOTER_COOLDOWN_MAX);
            }
        }

        Behavior::Exploder => {
            let bonus = if dist < EXPLODER_LUNGE_RANGE {
                EXPLODER_NEAR_BONUS
            } else {
                EXPLODER_FAR_BONUS
            };
            enemy.speed = enemy.base_speed + bonus;
            enemy.pos += dir * enemy.speed;
        }
    }

    enemy.pos = bounds.clamp_position(enemy.pos, enemy.size);
    fired
}

/// A projectile centered on `origin` flying toward `target`
pub fn aimed_projectile(origin: Vec2, target: Vec2) -> Projectile {
    let (dir, _) = direction_to(origin, target);
    let size = Vec2::splat(PROJECTILE_SIZE);
    Projectile {
        id: 0,
        pos: origin - size * 0.5,
        size,
        vel: dir * PROJECTILE_SPEED,
    }
}
