//! Player kinematics: gravity, jumping and walking
//!
//! Units are per tick. Collision response lives in [`super::collision`].

use super::collision::{resolve_floor, resolve_support};
use super::state::GameState;

/// Vertical step: gravity, floor and platform support, then jump
///
/// Clears `grounded` first, so afterwards it reflects contact made this tick.
pub fn step_vertical(state: &mut GameState, jump_held: bool) {
    let floor_line = state.floor_line();
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.grounded = false;
    player.vel.y += tuning.gravity;
    player.pos.y += player.vel.y;

    resolve_floor(player, floor_line);
    resolve_support(player, &state.platforms, tuning.landing_tolerance);

    if jump_held && player.grounded && !player.airborne {
        player.vel.y = -tuning.jump_impulse;
        player.airborne = true;
    }
}

/// Horizontal step: walk left or right (left wins when both are held) and
/// stop at the world's left edge
///
/// Returns the realized x delta.
pub fn step_horizontal(state: &mut GameState, move_left: bool, move_right: bool) -> f32 {
    let speed = state.tuning.player_speed;
    let player = &mut state.player;
    let prev_x = player.pos.x;

    if move_left {
        player.pos.x -= speed;
    } else if move_right {
        player.pos.x += speed;
    }
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
    }

    player.pos.x - prev_x
}
