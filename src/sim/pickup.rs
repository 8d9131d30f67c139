//! Coin pickup: proximity test plus pH and score effects

use super::state::{CoinKind, GameEvent, GameState};

/// Collect every coin within reach of the player's center
///
/// Reach is half the player's width plus the coin radius. Each coin is
/// removed on pickup, so it can only ever apply once. Returns the number of
/// coins collected.
pub fn collect_coins(state: &mut GameState) -> usize {
    let center = state.player.center();
    let reach = state.player.size.x / 2.0;

    let mut collected = Vec::new();
    state.coins.retain(|coin| {
        if center.distance(coin.pos) < reach + coin.radius {
            collected.push(coin.kind);
            false
        } else {
            true
        }
    });

    let step = state.tuning.ph_step_tenths;
    for &kind in &collected {
        match kind {
            CoinKind::Limestone => {
                state.player.score += 1;
                state.ph.raise(step);
            }
            CoinKind::HeavyMetal => {
                state.player.score -= 1;
                state.ph.lower(step);
            }
        }
        state.events.push(GameEvent::CoinCollected { kind });
    }

    collected.len()
}
