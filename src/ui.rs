//! Screen layout
//!
//! One place computes where the menus, buttons and HUD boxes sit for a given
//! viewport. The renderer draws from it and the tick hit-tests against it, so
//! the two cannot drift apart.

use glam::Vec2;

use crate::sim::{Aabb, GamePhase, Viewport};

/// Instruction lines shown on the start screen
pub const INSTRUCTIONS: [&str; 6] = [
    "• You are a water droplet.",
    "• You are trying to avoid the gray coins because those are",
    "  heavy metals like iron that will lower your pH level.",
    "• You are trying to collect the white coins because they are limestone",
    "  and will increase your pH level.",
    "• You want to try to increase your pH level as much as possible.",
];

pub const TITLE: &str = "Hello! Welcome to our game";
pub const SUBTITLE: &str = "Before you begin, a few things to know:";

pub const BUTTON_WIDTH: f32 = 120.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
/// Vertical distance between instruction lines
pub const LINE_SPACING: f32 = 40.0;
/// Gap between the last instruction line and the start button
const START_BUTTON_MARGIN: f32 = 40.0;
/// Half the width of the instruction block (lines are left-aligned)
const INSTRUCTIONS_HALF_WIDTH: f32 = 250.0;

/// Clickable buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Reset,
}

/// Computed positions for one viewport size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    /// Centered text anchors on the start screen
    pub title: Vec2,
    pub subtitle: Vec2,
    /// Left-aligned baseline of the first instruction line
    pub instructions_origin: Vec2,
    pub start_button: Aabb,
    /// Centered "Game Over" text anchor
    pub game_over_text: Vec2,
    pub reset_button: Aabb,
    pub score_box: Aabb,
    pub high_score_box: Aabb,
    pub ph_box: Aabb,
}

impl Layout {
    pub fn new(viewport: Viewport) -> Self {
        let cx = viewport.width / 2.0;
        let cy = viewport.height / 2.0;

        let instructions_origin = Vec2::new(cx - INSTRUCTIONS_HALF_WIDTH, cy - 60.0);
        let instructions_end = instructions_origin.y + INSTRUCTIONS.len() as f32 * LINE_SPACING;

        Self {
            viewport,
            title: Vec2::new(cx, cy - 150.0),
            subtitle: Vec2::new(cx, cy - 100.0),
            instructions_origin,
            start_button: centered_button(cx, instructions_end + START_BUTTON_MARGIN),
            game_over_text: Vec2::new(cx, cy - 50.0),
            reset_button: centered_button(cx, cy + 20.0),
            score_box: Aabb::from_xywh(5.0, 5.0, 150.0, 35.0),
            high_score_box: Aabb::from_xywh(viewport.width - 185.0, 5.0, 180.0, 35.0),
            ph_box: Aabb::from_xywh(5.0, 45.0, 200.0, 35.0),
        }
    }

    /// Instruction lines with their baselines
    pub fn instruction_lines(&self) -> impl Iterator<Item = (&'static str, Vec2)> + '_ {
        INSTRUCTIONS.iter().enumerate().map(move |(i, line)| {
            (
                *line,
                self.instructions_origin + Vec2::new(0.0, i as f32 * LINE_SPACING),
            )
        })
    }

    /// The button under `point`, if it is visible in `phase`
    pub fn hit_test(&self, phase: GamePhase, point: Vec2) -> Option<Button> {
        match phase {
            GamePhase::Start if self.start_button.contains(point) => Some(Button::Start),
            GamePhase::GameOver if self.reset_button.contains(point) => Some(Button::Reset),
            _ => None,
        }
    }
}

fn centered_button(cx: f32, top: f32) -> Aabb {
    Aabb::from_xywh(cx - BUTTON_WIDTH / 2.0, top, BUTTON_WIDTH, BUTTON_HEIGHT)
}
