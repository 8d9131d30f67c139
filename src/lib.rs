//! Droplet - a side-scrolling pH platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, kinematics, coins, game state)
//! - `renderer`: Canvas 2D presentation (wasm only)
//! - `platform`: Browser input mapping and asset loading
//! - `tuning`: Data-driven game balance
//! - `ui`: Screen layout shared by drawing and hit-testing

pub mod highscores;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use tuning::{Tuning, TuningError};

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, all tuning values are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport used when no canvas is available (native runs, tests)
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}
