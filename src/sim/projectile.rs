//! Projectile motion and culling

use super::geom::{Rect, WorldBounds};
use super::state::Projectile;
use crate::consts::PROJECTILE_CULL_MARGIN;

/// Move every projectile by its velocity and drop the ones that left the
/// world by more than the cull margin. Returns how many were culled.
pub fn update_projectiles(projectiles: &mut Vec<Projectile>, bounds: &WorldBounds) -> usize {
    let before = projectiles.len();
    projectiles.retain_mut(|p| {
        p.pos += p.vel;
        !is_out_of_bounds(p, bounds)
    });
    before - projectiles.len()
}

fn is_out_of_bounds(p: &Projectile, bounds: &WorldBounds) -> bool {
    p.pos.x < -PROJECTILE_CULL_MARGIN
        || p.pos.x > bounds.width + PROJECTILE_CULL_MARGIN
        || p.pos.y < -PROJECTILE_CULL_MARGIN
        || p.pos.y > bounds.height + PROJECTILE_CULL_MARGIN
}

/// First projectile overlapping `target`, if any
pub fn first_hit<'a>(projectiles: &'a [Projectile], target: &Rect) -> Option<&'a Projectile> {
    projectiles.iter().find(|p| p.rect().overlaps(target))
}
