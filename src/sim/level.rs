//! Procedural level generation
//!
//! Platforms are appended one per tick while the frontier is close to the
//! right edge of the screen. Old platforms are never pruned.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, CoinKind, GameState, Platform};

/// Extend the world by one platform if the frontier is inside the lookahead
///
/// Returns true if a platform was added.
pub fn ensure_frontier(state: &mut GameState) -> bool {
    let needs_platform = match state.platforms.last() {
        None => true,
        Some(last) => last.pos.x - state.camera.x < state.viewport.width - state.tuning.lookahead,
    };
    if !needs_platform {
        return false;
    }

    let color = state.rng.random_range(0..=0xFF_FFFFu32);
    let gap = state.rng.random_range(state.tuning.min_gap..=state.tuning.max_gap) as f32;

    let frontier = state.platforms.last().map(|last| (last.right(), last.top()));
    let pos = match frontier {
        None => Vec2::new(state.player.pos.x + gap, state.player.pos.y),
        Some((right, top)) => {
            let (lo, hi) = reachable_band(state, top);
            let y = state.rng.random_range(lo..=hi) as f32;
            Vec2::new(right + gap, y)
        }
    };

    let size = Vec2::new(state.tuning.platform_width, state.tuning.platform_height);
    state.platforms.push(Platform::new(pos, size, color));
    log::debug!(
        "Platform #{} at ({:.0}, {:.0})",
        state.platforms.len(),
        pos.x,
        pos.y
    );

    if state.platforms.len() == 1 {
        // First platform of the session: start the player on it
        state.player.pos.x = pos.x;
        state.player.stand_on(pos.y);
    }

    populate_coins(state);
    true
}

/// Integer range of platform tops reachable from a platform at `prev_y`
///
/// Bounded by twice the jump impulse and by the global height limits. A
/// degenerate band (viewport too short) collapses onto its lower bound.
pub fn reachable_band(state: &GameState, prev_y: f32) -> (i32, i32) {
    let span = state.tuning.reachable_span();
    let lo = state.global_min_height().max(prev_y - span).ceil() as i32;
    let hi = state.global_max_height().min(prev_y + span).floor() as i32;
    (lo, hi.max(lo))
}

/// Spawn coins on every platform that has none yet (one-shot per platform)
pub fn populate_coins(state: &mut GameState) {
    let tuning = &state.tuning;
    for platform in state.platforms.iter_mut().filter(|p| !p.coins_generated) {
        let count = state.rng.random_range(tuning.min_coins..=tuning.max_coins);
        let spacing = platform.size.x / (count + 1) as f32;

        for i in 0..count {
            let kind = if state.rng.random_bool(tuning.heavy_metal_chance) {
                CoinKind::HeavyMetal
            } else {
                CoinKind::Limestone
            };
            let pos = Vec2::new(
                platform.pos.x + spacing * (i + 1) as f32,
                platform.top() - tuning.coin_lift,
            );
            state.coins.push(Coin::new(pos, tuning.coin_radius, kind));
        }
        platform.coins_generated = true;
    }
}
