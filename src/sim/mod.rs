//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (every rate is per tick)
//! - Seeded RNG only
//! - Stable iteration order (platforms by x, coins by spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod kinematics;
pub mod level;
pub mod pickup;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{is_standing, resolve_directional, resolve_floor, resolve_support};
pub use level::{ensure_frontier, populate_coins, reachable_band};
pub use pickup::collect_coins;
pub use state::{
    Camera, Coin, CoinKind, Facing, GameEvent, GameOverCause, GamePhase, GameState, PhLevel,
    Platform, Player, SpriteFrame, Viewport,
};
pub use tick::{TickInput, reset_to_menu, start_session, tick};
