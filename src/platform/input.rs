//! Keyboard and pointer input
//!
//! DOM handlers write here, the game loop reads a [`TickInput`] snapshot once
//! per tick. Held keys are last-write-wins per key code; confirm and click are
//! one-shot and cleared once a tick has consumed them.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

const LEFT_CODES: [&str; 2] = ["ArrowLeft", "KeyA"];
const RIGHT_CODES: [&str; 2] = ["ArrowRight", "KeyD"];
const JUMP_CODES: [&str; 3] = ["ArrowUp", "KeyW", "Space"];
const CONFIRM_CODES: [&str; 2] = ["Space", "Enter"];

/// Whether the browser's default action (page scroll) should be suppressed
pub fn should_prevent_default(code: &str) -> bool {
    LEFT_CODES
        .iter()
        .chain(&RIGHT_CODES)
        .chain(&JUMP_CODES)
        .any(|&c| c == code)
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<&'static str>,
    confirm: bool,
    pointer: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Unknown codes are ignored.
    pub fn key_down(&mut self, code: &str) {
        if let Some(known) = canonical(code) {
            self.held.insert(known);
        }
        if CONFIRM_CODES.contains(&code) {
            self.confirm = true;
        }
    }

    /// Record a keyup. Unknown codes are ignored.
    pub fn key_up(&mut self, code: &str) {
        if let Some(known) = canonical(code) {
            self.held.remove(known);
        }
    }

    /// Record a click in canvas coordinates (last click wins)
    pub fn click(&mut self, point: Vec2) {
        self.pointer = Some(point);
    }

    /// Drop all held keys (focus lost, keyups will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    fn any_held(&self, codes: &[&'static str]) -> bool {
        codes.iter().any(|code| self.held.contains(code))
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.any_held(&LEFT_CODES),
            move_right: self.any_held(&RIGHT_CODES),
            jump: self.any_held(&JUMP_CODES),
            confirm: self.confirm,
            pointer: self.pointer,
        }
    }

    /// Clear one-shot inputs after a tick has seen them
    pub fn clear_one_shots(&mut self) {
        self.confirm = false;
        self.pointer = None;
    }
}

/// Map a DOM code onto the static string stored in the held set
fn canonical(code: &str) -> Option<&'static str> {
    LEFT_CODES
        .iter()
        .chain(&RIGHT_CODES)
        .chain(&JUMP_CODES)
        .chain(&CONFIRM_CODES)
        .find(|&&c| c == code)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd_are_equivalent() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        assert!(input.tick_input().move_left);
        input.key_up("KeyA");
        input.key_down("ArrowRight");
        let snapshot = input.tick_input();
        assert!(!snapshot.move_left);
        assert!(snapshot.move_right);
    }

    #[test]
    fn test_releasing_one_binding_keeps_the_other() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft");
        input.key_down("KeyA");
        input.key_up("KeyA");
        assert!(input.tick_input().move_left);
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let mut input = InputState::new();
        input.key_down("KeyZ");
        input.key_down("F13");
        assert_eq!(input.tick_input(), TickInput::default());
        assert!(!should_prevent_default("KeyZ"));
    }

    #[test]
    fn test_space_jumps_and_confirms() {
        let mut input = InputState::new();
        input.key_down("Space");
        let snapshot = input.tick_input();
        assert!(snapshot.jump);
        assert!(snapshot.confirm);

        input.clear_one_shots();
        let snapshot = input.tick_input();
        assert!(snapshot.jump);
        assert!(!snapshot.confirm);
    }

    #[test]
    fn test_enter_only_confirms() {
        let mut input = InputState::new();
        input.key_down("Enter");
        let snapshot = input.tick_input();
        assert!(snapshot.confirm);
        assert!(!snapshot.jump);
        assert!(!should_prevent_default("Enter"));
        assert!(should_prevent_default("Space"));
    }

    #[test]
    fn test_click_is_one_shot() {
        let mut input = InputState::new();
        input.click(Vec2::new(1.0, 2.0));
        input.click(Vec2::new(3.0, 4.0));
        assert_eq!(input.tick_input().pointer, Some(Vec2::new(3.0, 4.0)));
        input.clear_one_shots();
        assert_eq!(input.tick_input().pointer, None);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down("KeyD");
        input.key_down("KeyW");
        input.release_all();
        let snapshot = input.tick_input();
        assert!(!snapshot.move_right && !snapshot.jump);
    }
}
