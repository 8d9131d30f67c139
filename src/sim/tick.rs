//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. The phase
//! decides which subsystems run:
//! - `Start`: only waits for the start action
//! - `Playing`: kinematics, collisions, coins, camera, generation, end checks
//! - `GameOver`: only waits for the reset action

use glam::Vec2;

use super::collision::{is_standing, resolve_directional, resolve_floor};
use super::kinematics::{step_horizontal, step_vertical};
use super::level::ensure_frontier;
use super::pickup::collect_coins;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::ui::{Button, Layout};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held: ArrowLeft / KeyA
    pub move_left: bool,
    /// Held: ArrowRight / KeyD
    pub move_right: bool,
    /// Held: ArrowUp / KeyW / Space
    pub jump: bool,
    /// One-shot: Space / Enter pressed (starts a session from the menu)
    pub confirm: bool,
    /// One-shot: click position in screen coordinates
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Whether the click landed on `button` in the current phase
    fn clicked(&self, layout: &Layout, phase: GamePhase, button: Button) -> bool {
        self.pointer
            .and_then(|point| layout.hit_test(phase, point))
            .is_some_and(|hit| hit == button)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Start => {
            let layout = Layout::new(state.viewport);
            if input.confirm || input.clicked(&layout, GamePhase::Start, Button::Start) {
                start_session(state);
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;
            step_playing(state, input);
            for coin in &mut state.coins {
                coin.advance_spin();
            }
        }

        GamePhase::GameOver => {
            let layout = Layout::new(state.viewport);
            if input.clicked(&layout, GamePhase::GameOver, Button::Reset) {
                reset_to_menu(state);
                return;
            }
            for coin in &mut state.coins {
                coin.advance_spin();
            }
            state.explosion_ticks = state.explosion_ticks.saturating_add(1);
        }
    }
}

/// One tick of active gameplay
fn step_playing(state: &mut GameState, input: &TickInput) {
    let floor_line = state.floor_line();

    // Vertical motion and collisions
    step_vertical(state, input.jump);
    resolve_directional(
        &mut state.player,
        &state.platforms,
        state.tuning.side_tolerance,
    );
    if state.player.bottom() > floor_line {
        resolve_floor(&mut state.player, floor_line);
    }
    collect_coins(state);

    state.player.airborne = !is_standing(&state.player, &state.platforms, floor_line);

    // Horizontal motion, then a second pickup chance at the new position
    let dx = step_horizontal(state, input.move_left, input.move_right);
    collect_coins(state);
    state.player.vel.x = dx;
    state
        .player
        .advance_walk_cycle(input.move_left || input.move_right);

    state
        .camera
        .follow(state.player.pos.x, state.viewport.width);
    ensure_frontier(state);

    check_session_end(state);
}

/// End the session on pH depletion (checked first) or floor contact
fn check_session_end(state: &mut GameState) {
    let cause = if state.ph.is_depleted() {
        GameOverCause::Dissolved
    } else if state.player.bottom() >= state.floor_line() {
        GameOverCause::Fell
    } else {
        return;
    };

    state.phase = GamePhase::GameOver;
    state.explosion_ticks = 0;
    let score = state.player.score;
    let new_high_score = state.high_score.submit(score);
    log::info!(
        "Game over ({:?}) after {} ticks score={} pH={} distance={:.0}",
        cause,
        state.time_ticks,
        score,
        state.ph,
        state.player.pos.x
    );
    state.events.push(GameEvent::GameOver {
        cause,
        score,
        new_high_score,
    });
}

/// Start → Playing: fresh session with the first platform under the player
pub fn start_session(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Playing;
    ensure_frontier(state);
    state.events.push(GameEvent::SessionStarted);
    log::info!("Session started (seed {})", state.seed);
}

/// GameOver → Start: clear the world and return to the menu
pub fn reset_to_menu(state: &mut GameState) {
    state.reset_session();
    state.phase = GamePhase::Start;
    state.events.push(GameEvent::SessionReset);
    log::info!("Session reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::CONTACT_EPSILON;
    use crate::sim::state::{Coin, CoinKind, PhLevel, Platform, Viewport};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Viewport::default(), Tuning::default())
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn click(point: Vec2) -> TickInput {
        TickInput {
            pointer: Some(point),
            ..Default::default()
        }
    }

    fn playing_state(seed: u64) -> GameState {
        let mut state = new_state(seed);
        tick(&mut state, &confirm());
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_start_waits_for_action() {
        let mut state = new_state(1);
        let input = TickInput {
            move_right: true,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_start_by_confirm() {
        let mut state = new_state(1);
        tick(&mut state, &confirm());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.player.bottom(), state.platforms[0].top());
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_start_by_button_click() {
        let mut state = new_state(1);
        let layout = Layout::new(state.viewport);

        // Click next to the button does nothing
        tick(&mut state, &click(Vec2::new(10.0, 10.0)));
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &click(layout.start_button.center()));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_standing_session_stays_alive() {
        let mut state = playing_state(2);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.grounded);
        assert!(!state.player.airborne);
        assert_eq!(state.player.bottom(), state.platforms[0].top());
    }

    #[test]
    fn test_jump_and_land_again() {
        let mut state = playing_state(2);
        let top = state.platforms[0].top();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        tick(&mut state, &TickInput::default());
        assert!(state.player.bottom() < top);
        assert!(state.player.airborne);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bottom(), top);
        assert!(!state.player.airborne);
    }

    #[test]
    fn test_three_limestone_scenario() {
        let mut state = playing_state(3);
        state.coins.clear();
        let center = state.player.center();
        for _ in 0..3 {
            state.coins.push(Coin::new(center, 10.0, CoinKind::Limestone));
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.score, 3);
        assert!((state.ph.value() - 7.3).abs() < 1e-6);
    }

    #[test]
    fn test_coin_reached_by_horizontal_step_collected_same_tick() {
        let mut state = playing_state(3);
        state.platforms = vec![Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(5000.0, 20.0),
            0,
        )];
        state.coins.clear();
        state.player.pos = Vec2::new(1000.0, 350.0);

        // Just out of reach (25) before the step, 22 away after it
        let center = state.player.center();
        let coin_pos = center + Vec2::new(26.0, 0.0);
        state.coins.push(Coin::new(coin_pos, 10.0, CoinKind::Limestone));
        state.drain_events();

        tick(&mut state, &TickInput {
            move_right: true,
            ..Default::default()
        });
        assert_eq!(state.player.pos.x, 1004.0);
        assert_eq!(state.player.score, 1);
        assert_eq!(state.ph.tenths(), 71);
        assert!(!state.coins.iter().any(|c| c.pos == coin_pos));
        assert!(state.drain_events().contains(&GameEvent::CoinCollected {
            kind: CoinKind::Limestone
        }));
    }

    #[test]
    fn test_coin_out_of_reach_without_step_stays() {
        let mut state = playing_state(3);
        state.platforms = vec![Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(5000.0, 20.0),
            0,
        )];
        state.coins.clear();
        state.player.pos = Vec2::new(1000.0, 350.0);
        let coin_pos = state.player.center() + Vec2::new(26.0, 0.0);
        state.coins.push(Coin::new(coin_pos, 10.0, CoinKind::Limestone));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.score, 0);
        assert_eq!(state.ph.tenths(), 70);
        assert!(state.coins.iter().any(|c| c.pos == coin_pos));
    }

    #[test]
    fn test_ph_depletion_ends_session_and_records_high_score() {
        let mut state = playing_state(4);
        state.coins.clear();
        state.player.score = 5;
        state.ph = PhLevel::from_tenths(1);
        let center = state.player.center();
        state.coins.push(Coin::new(center, 10.0, CoinKind::HeavyMetal));
        state.drain_events();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ph.tenths(), 0);
        assert_eq!(state.high_score.best(), 4);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver {
            cause: GameOverCause::Dissolved,
            score: 4,
            new_high_score: true,
        }));
    }

    #[test]
    fn test_zero_ph_ends_session_next_tick() {
        let mut state = playing_state(4);
        state.ph = PhLevel::from_tenths(0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        // Score 0 does not beat the stored best of 0
        assert_eq!(state.high_score.best(), 0);
    }

    #[test]
    fn test_falling_onto_floor_ends_session() {
        let mut state = playing_state(5);
        // Keep the world non-empty but far away so nothing catches the player
        state.platforms = vec![Platform::new(
            Vec2::new(5000.0, 400.0),
            Vec2::new(200.0, 20.0),
            0,
        )];
        state.coins.clear();
        state.player.pos.y = state.floor_line() - state.player.size.y - 1.0;
        state.player.vel.y = 5.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.player.bottom(), state.floor_line());
        assert!(state.ph.tenths() > 0);
        assert!(state.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: GameOverCause::Fell,
                ..
            }
        )));
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = playing_state(6);
        state.ph = PhLevel::from_tenths(0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 1);

        let pos = state.player.pos;
        let input = TickInput {
            move_right: true,
            jump: true,
            confirm: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.explosion_ticks, 10);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut state = playing_state(7);
        for _ in 0..30 {
            tick(&mut state, &TickInput {
                move_right: true,
                ..Default::default()
            });
        }
        state.player.score = 3;
        state.ph = PhLevel::from_tenths(0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let layout = Layout::new(state.viewport);
        tick(&mut state, &click(layout.reset_button.center()));
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.platforms.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.ph.value(), 7.0);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.high_score.best(), 3);
    }

    #[test]
    fn test_reset_click_outside_button_ignored() {
        let mut state = playing_state(7);
        state.ph = PhLevel::from_tenths(0);
        tick(&mut state, &TickInput::default());
        let layout = Layout::new(state.viewport);
        tick(&mut state, &click(layout.start_button.center()));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_walking_left_from_origin_keeps_camera_at_zero() {
        let mut state = playing_state(8);
        state.platforms = vec![Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(2000.0, 20.0),
            0,
        )];
        state.coins.clear();
        state.player.pos = Vec2::new(10.0, 350.0);
        for i in 0..200 {
            let input = TickInput {
                move_left: i % 20 < 10,
                move_right: i % 20 >= 10,
                ..Default::default()
            };
            tick(&mut state, &input);
            assert!(state.camera.x >= 0.0);
            assert!(state.player.pos.x >= 0.0);
        }
    }

    #[test]
    fn test_camera_follows_right() {
        let mut state = playing_state(8);
        state.platforms = vec![Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(5000.0, 20.0),
            0,
        )];
        state.coins.clear();
        state.player.pos = Vec2::new(1000.0, 350.0);
        tick(&mut state, &TickInput {
            move_right: true,
            ..Default::default()
        });
        assert_eq!(state.player.pos.x, 1004.0);
        assert_eq!(state.camera.x, 604.0);
        assert_eq!(state.player.vel.x, 4.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = playing_state(99999);
        let mut state2 = playing_state(99999);

        let inputs = [
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.platforms.len(), state2.platforms.len());
        assert_eq!(state1.coins.len(), state2.coins.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.score, state2.player.score);
    }

    proptest! {
        #[test]
        fn prop_grounded_means_on_a_surface(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = playing_state(seed);
            for (left, right, jump) in inputs {
                let input = TickInput {
                    move_left: left,
                    move_right: right,
                    jump,
                    ..Default::default()
                };
                tick(&mut state, &input);

                if state.player.grounded {
                    let bottom = state.player.bottom();
                    let on_floor = (bottom - state.floor_line()).abs() < CONTACT_EPSILON;
                    let on_platform = state
                        .platforms
                        .iter()
                        .any(|p| (bottom - p.top()).abs() < CONTACT_EPSILON);
                    prop_assert!(on_floor || on_platform);
                }
                prop_assert!(state.camera.x >= 0.0);

                if state.phase != GamePhase::Playing {
                    break;
                }
            }
        }

        #[test]
        fn prop_frontier_stays_ahead_of_camera(
            seed in any::<u64>(),
            ticks in 1usize..600,
        ) {
            let mut state = playing_state(seed);
            let input = TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            };
            for _ in 0..ticks {
                tick(&mut state, &input);
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
            let last = state.platforms.last().unwrap();
            // Generation runs once per tick, so the frontier can lag by at most one step
            let max_step = state.tuning.platform_width + state.tuning.max_gap as f32;
            prop_assert!(last.pos.x - state.camera.x + max_step >= state.viewport.width - state.tuning.lookahead);
            for pair in state.platforms.windows(2) {
                prop_assert!(pair[0].pos.x < pair[1].pos.x);
            }
        }
    }
}
