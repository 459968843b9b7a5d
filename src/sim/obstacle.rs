//! Patrolling obstacles

use super::geom::clamp;
use super::state::Obstacle;

/// Move each obstacle along its active axis, bouncing at the patrol range.
pub fn update_obstacles(obstacles: &mut [Obstacle]) {
    for o in obstacles.iter_mut() {
        o.pos += o.dir * o.speed;

        if o.dir.x != 0.0 && (o.pos.x <= o.patrol_min.x || o.pos.x >= o.patrol_max.x) {
            o.dir.x = -o.dir.x;
        }
        if o.dir.y != 0.0 && (o.pos.y <= o.patrol_min.y || o.pos.y >= o.patrol_max.y) {
            o.dir.y = -o.dir.y;
        }

        o.pos.x = clamp(o.pos.x, o.patrol_min.x, o.patrol_max.x);
        o.pos.y = clamp(o.pos.y, o.patrol_min.y, o.patrol_max.y);
    }
}
