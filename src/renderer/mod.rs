//! Canvas 2D rendering module
//!
//! Draws a read-only [`crate::sim::GameState`] each frame. Nothing here mutates
//! the simulation.

pub mod canvas;
pub mod sprites;

pub use canvas::CanvasRenderer;
pub use sprites::Sprites;
