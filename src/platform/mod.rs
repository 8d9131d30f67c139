//! Platform abstraction layer
//!
//! Browser-facing pieces that do not need a browser to test:
//! - Input events (key codes to held actions, one-shot confirm/click)
//! - Asset loading (the five images and the barrier that gates the first frame)

pub mod assets;
pub mod input;

pub use assets::{AssetError, AssetKind, LoadBarrier};
pub use input::InputState;
