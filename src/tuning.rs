//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override any of them with
//! a JSON block. Missing fields fall back to the defaults below. All rates are
//! per simulation tick, not per second.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Spawn x (world units)
    pub spawn_x: f32,
    /// Spawn height above the bottom of the viewport
    pub spawn_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed (units/tick)
    pub player_speed: f32,
    /// Upward velocity applied on jump (units/tick)
    pub jump_impulse: f32,
    /// Downward acceleration (units/tick²)
    pub gravity: f32,

    // === World ===
    /// Height of the lava floor band at the bottom of the viewport
    pub floor_height: f32,
    /// Tolerance above a platform top that still counts as standing on it
    pub landing_tolerance: f32,
    /// Width of the side band in which the player is pushed off a platform edge
    pub side_tolerance: f32,

    // === Level generation ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub min_gap: i32,
    pub max_gap: i32,
    /// A new platform is generated once the frontier is closer than this to
    /// the right edge of the screen
    pub lookahead: f32,
    /// Lowest allowed platform top, measured up from the bottom of the viewport
    pub max_height_margin: f32,

    // === Coins ===
    pub coin_radius: f32,
    /// Coin center height above the platform top
    pub coin_lift: f32,
    pub min_coins: u32,
    pub max_coins: u32,
    /// Probability that a coin is a heavy metal
    pub heavy_metal_chance: f64,

    // === Session ===
    /// Starting pH in tenths
    pub start_ph_tenths: u32,
    /// pH change per coin in tenths
    pub ph_step_tenths: u32,
    /// Ticks the explosion stays on screen after game over
    pub explosion_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_x: 50.0,
            spawn_height: 200.0,
            player_width: 30.0,
            player_height: 50.0,
            player_speed: 4.0,
            jump_impulse: 12.0,
            gravity: 0.5,

            floor_height: 50.0,
            landing_tolerance: 5.0,
            side_tolerance: 5.0,

            platform_width: 200.0,
            platform_height: 20.0,
            min_gap: 50,
            max_gap: 200,
            lookahead: 200.0,
            max_height_margin: 150.0,

            coin_radius: 10.0,
            coin_lift: 25.0,
            min_coins: 1,
            max_coins: 4,
            heavy_metal_chance: 0.5,

            start_ph_tenths: 70,
            ph_step_tenths: 1,
            explosion_ticks: 50,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and validate the merged result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break generation or physics
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_speed", self.player_speed)?;
        positive("jump_impulse", self.jump_impulse)?;
        positive("gravity", self.gravity)?;
        positive("platform_width", self.platform_width)?;
        positive("platform_height", self.platform_height)?;
        positive("coin_radius", self.coin_radius)?;

        // Gaps keep platform x strictly increasing
        if self.min_gap <= 0 {
            return Err(TuningError::Invalid {
                field: "min_gap",
                reason: "must be at least 1",
            });
        }
        if self.max_gap < self.min_gap {
            return Err(TuningError::Invalid {
                field: "max_gap",
                reason: "must not be smaller than min_gap",
            });
        }
        if self.min_coins == 0 || self.max_coins < self.min_coins {
            return Err(TuningError::Invalid {
                field: "max_coins",
                reason: "coin count range must be non-empty and start at 1 or more",
            });
        }
        if !(0.0..=1.0).contains(&self.heavy_metal_chance) {
            return Err(TuningError::Invalid {
                field: "heavy_metal_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.start_ph_tenths == 0 {
            return Err(TuningError::Invalid {
                field: "start_ph_tenths",
                reason: "a session cannot start already dissolved",
            });
        }
        Ok(())
    }

    /// Vertical reach used to bound the next platform (twice the jump impulse)
    pub fn reachable_span(&self) -> f32 {
        self.jump_impulse * 2.0
    }
}
