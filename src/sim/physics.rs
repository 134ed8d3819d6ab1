//! Player integrator
//!
//! Constant gravity, instantaneous horizontal speed, ground-only jumps.
//! All constants are per tick.

use super::state::Player;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Safety cap for the reach scan (gravity > 0 ends it long before this)
const MAX_AIRBORNE_TICKS: u32 = 10_000;

/// Advance the player by one tick.
///
/// Touches nothing but the player. `camera_x` is the camera position from the
/// previous tick; the player is never allowed behind `camera_x + camera_margin`.
pub fn integrate(player: &mut Player, input: &TickInput, tuning: &Tuning, camera_x: f32) {
    player.vel.x = if input.move_left {
        -tuning.max_speed
    } else if input.move_right {
        tuning.max_speed
    } else {
        0.0
    };

    // No buffering, no double jump
    if input.jump && player.grounded {
        player.vel.y = -tuning.jump_impulse;
        player.grounded = false;
    }

    player.vel.y += tuning.gravity;
    player.pos.y += player.vel.y;
    player.pos.x = (player.pos.x + player.vel.x).max(camera_x + tuning.camera_margin);
}

/// Horizontal distance a full-speed jump covers while staying at least `rise`
/// pixels above its takeoff height.
///
/// Steps the same per-tick model as [`integrate`], so the result is exact for
/// the simulation rather than the continuous parabola. Returns 0 when the jump
/// apex never reaches `rise`.
pub fn jump_reach(tuning: &Tuning, rise: f32) -> f32 {
    let mut vy = -tuning.jump_impulse;
    let mut height = 0.0;
    let mut last_above = 0u32;

    for t in 1..=MAX_AIRBORNE_TICKS {
        vy += tuning.gravity;
        height -= vy;
        if height >= rise {
            last_above = t;
        } else if vy > 0.0 {
            break;
        }
    }

    last_above as f32 * tuning.max_speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, y: f32, grounded: bool) -> Player {
        Player {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(40.0, 40.0),
            grounded,
        }
    }

    #[test]
    fn test_gravity_applies_every_tick() {
        let tuning = Tuning::default();
        let mut player = player_at(100.0, 100.0, false);
        integrate(&mut player, &TickInput::default(), &tuning, 0.0);
        assert_eq!(player.vel.y, 0.5);
        assert_eq!(player.pos.y, 100.5);
        integrate(&mut player, &TickInput::default(), &tuning, 0.0);
        assert_eq!(player.vel.y, 1.0);
        assert_eq!(player.pos.y, 101.5);
    }

    #[test]
    fn test_horizontal_speed_is_instant() {
        let tuning = Tuning::default();
        let mut player = player_at(100.0, 100.0, true);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        integrate(&mut player, &right, &tuning, 0.0);
        assert_eq!(player.vel.x, 6.0);
        assert_eq!(player.pos.x, 106.0);

        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        integrate(&mut player, &left, &tuning, 0.0);
        assert_eq!(player.vel.x, -6.0);
        assert_eq!(player.pos.x, 100.0);

        integrate(&mut player, &TickInput::default(), &tuning, 0.0);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.pos.x, 100.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        let mut grounded = player_at(100.0, 340.0, true);
        integrate(&mut grounded, &jump, &tuning, 0.0);
        assert!(!grounded.grounded);
        assert_eq!(grounded.vel.y, -11.5);

        // Airborne request is dropped
        let mut airborne = player_at(100.0, 200.0, false);
        airborne.vel.y = 3.0;
        integrate(&mut airborne, &jump, &tuning, 0.0);
        assert_eq!(airborne.vel.y, 3.5);
    }

    #[test]
    fn test_player_clamped_to_camera_margin() {
        let tuning = Tuning::default();
        let mut player = player_at(100.0, 100.0, true);
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        integrate(&mut player, &left, &tuning, 90.0);
        assert_eq!(player.pos.x, 110.0);
    }

    #[test]
    fn test_jump_reach_matches_default_tuning() {
        let tuning = Tuning::default();
        // Heights 12n - 0.25n(n+1): 85.5 at n=38, 78 at n=39
        assert_eq!(jump_reach(&tuning, 80.0), 38.0 * 6.0);
        // Level flight lands after 47 ticks above takeoff
        assert_eq!(jump_reach(&tuning, 0.0), 47.0 * 6.0);
        assert_eq!(jump_reach(&tuning, 500.0), 0.0);
    }

    #[test]
    fn test_jump_reach_is_monotone_in_rise() {
        let tuning = Tuning::default();
        let mut prev = f32::INFINITY;
        for rise in (0..140).step_by(10) {
            let reach = jump_reach(&tuning, rise as f32);
            assert!(reach <= prev);
            prev = reach;
        }
    }
}
