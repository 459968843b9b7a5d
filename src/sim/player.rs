//! Player controller: key state in, craft motion out
//!
//! Motion is authored per frame, not per second. Friction is a geometric
//! per-frame decay, so the craft's feel is tied to the host frame rate.

use glam::Vec2;

use super::geom::WorldBounds;
use super::state::Player;
use crate::consts::*;

/// Level-triggered key snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Advance the player one frame.
///
/// `_dt` is accepted for symmetry with the other systems; player motion is
/// per-frame.
pub fn update_player(player: &mut Player, keys: &KeyState, bounds: &WorldBounds, _dt: f32) {
    if keys.forward {
        player.speed += PLAYER_ACCEL;
    }
    if keys.backward {
        player.speed -= PLAYER_ACCEL;
    }
    player.speed = player.speed.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);

    if !keys.forward && !keys.backward {
        player.speed *= 1.0 - PLAYER_FRICTION;
    }

    if keys.turn_left {
        player.heading -= PLAYER_TURN_SPEED;
    }
    if keys.turn_right {
        player.heading += PLAYER_TURN_SPEED;
    }

    let step = Vec2::new(player.heading.cos(), player.heading.sin()) * player.speed;
    player.pos = bounds.clamp_position(player.pos + step, player.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn forward() -> KeyState {
        KeyState {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_thrust_accelerates_and_moves_along_heading() {
        let bounds = WorldBounds::base();
        let mut player = Player::centered(&bounds);
        let start = player.pos;

        update_player(&mut player, &forward(), &bounds, DT);
        assert!((player.speed - PLAYER_ACCEL).abs() < 1e-6);
        assert!((player.pos.x - (start.x + PLAYER_ACCEL)).abs() < 1e-4);
        assert_eq!(player.pos.y, start.y);
    }

    #[test]
    fn test_speed_capped() {
        let bounds = WorldBounds::new(100_000.0, 450.0);
        let mut player = Player::centered(&WorldBounds::base());
        for _ in 0..200 {
            update_player(&mut player, &forward(), &bounds, DT);
        }
        assert_eq!(player.speed, PLAYER_MAX_SPEED);

        let reverse = KeyState {
            backward: true,
            ..Default::default()
        };
        for _ in 0..200 {
            update_player(&mut player, &reverse, &bounds, DT);
        }
        assert_eq!(player.speed, -PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_coasting_decays_geometrically() {
        let bounds = WorldBounds::base();
        let mut player = Player::centered(&bounds);
        player.speed = 4.0;
        update_player(&mut player, &KeyState::default(), &bounds, DT);
        assert!((player.speed - 3.8).abs() < 1e-5);
        update_player(&mut player, &KeyState::default(), &bounds, DT);
        assert!((player.speed - 3.61).abs() < 1e-5);
    }

    #[test]
    fn test_both_thrust_keys_cancel_without_friction() {
        let bounds = WorldBounds::base();
        let mut player = Player::centered(&bounds);
        player.speed = 2.0;
        let both = KeyState {
            forward: true,
            backward: true,
            ..Default::default()
        };
        update_player(&mut player, &both, &bounds, DT);
        assert!((player.speed - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_turning() {
        let bounds = WorldBounds::base();
        let mut player = Player::centered(&bounds);
        let left = KeyState {
            turn_left: true,
            ..Default::default()
        };
        update_player(&mut player, &left, &bounds, DT);
        assert!((player.heading + PLAYER_TURN_SPEED).abs() < 1e-6);

        let right = KeyState {
            turn_right: true,
            ..Default::default()
        };
        update_player(&mut player, &right, &bounds, DT);
        update_player(&mut player, &right, &bounds, DT);
        assert!((player.heading - PLAYER_TURN_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_stops_at_wall() {
        let bounds = WorldBounds::base();
        let mut player = Player::centered(&bounds);
        for _ in 0..500 {
            update_player(&mut player, &forward(), &bounds, DT);
        }
        assert_eq!(player.pos.x, bounds.width - player.size.x);
    }

    proptest! {
        #[test]
        fn player_stays_in_bounds(
            inputs in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..300),
        ) {
            let bounds = WorldBounds::base();
            let mut player = Player::centered(&bounds);
            for (forward, backward, turn_left, turn_right) in inputs {
                let keys = KeyState { forward, backward, turn_left, turn_right };
                update_player(&mut player, &keys, &bounds, DT);
                prop_assert!(bounds.contains(player.pos, player.size));
                prop_assert!(player.speed.abs() <= PLAYER_MAX_SPEED);
            }
        }
    }
}
