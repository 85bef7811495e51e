//! Held-key latch
//!
//! Keyboard and touch callbacks write into the latch whenever events arrive;
//! the engine reads it once per step through [`InputLatch::snapshot`], so a
//! step never observes a half-applied key change.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Key names that move left
pub const LEFT_KEYS: [&str; 2] = ["arrowleft", "a"];
/// Key names that move right
pub const RIGHT_KEYS: [&str; 2] = ["arrowright", "d"];
/// Key names that jump
pub const JUMP_KEYS: [&str; 3] = ["arrowup", "w", " "];
/// Key names that enter a portal
pub const CONFIRM_KEYS: [&str; 2] = ["enter", " "];

/// Logical key name -> held state
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    keys: HashMap<String, bool>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Names are case-insensitive.
    pub fn set_key(&mut self, name: &str, held: bool) {
        self.keys.insert(name.to_lowercase(), held);
    }

    pub fn key_down(&mut self, name: &str) {
        self.set_key(name, true);
    }

    pub fn key_up(&mut self, name: &str) {
        self.set_key(name, false);
    }

    /// Unknown keys read as released
    pub fn is_held(&self, name: &str) -> bool {
        match self.keys.get(name) {
            Some(&held) => held,
            None => self.keys.get(&name.to_lowercase()).copied().unwrap_or(false),
        }
    }

    fn any_held(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_held(name))
    }

    /// Drop every held key (window blur, tab hidden)
    pub fn release_all(&mut self) {
        self.keys.values_mut().for_each(|held| *held = false);
    }

    /// Freeze the current key state into a per-step input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
            jump: self.any_held(&JUMP_KEYS),
            confirm: self.any_held(&CONFIRM_KEYS),
        }
    }

    /// Whether the host should suppress the browser default for this key
    /// (space scrolls, enter submits)
    pub fn prevents_default(key: &str) -> bool {
        matches!(key, " " | "Enter" | "enter")
    }
}

/// On-screen controls shown on touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
    /// Jump
    A,
    /// Confirm
    B,
}

impl TouchButton {
    pub const ALL: [TouchButton; 6] = [
        TouchButton::Up,
        TouchButton::Down,
        TouchButton::Left,
        TouchButton::Right,
        TouchButton::A,
        TouchButton::B,
    ];

    /// Keyboard key this button synthesizes
    pub fn key(&self) -> &'static str {
        match self {
            TouchButton::Up => "ArrowUp",
            TouchButton::Down => "ArrowDown",
            TouchButton::Left => "ArrowLeft",
            TouchButton::Right => "ArrowRight",
            TouchButton::A => " ",
            TouchButton::B => "Enter",
        }
    }

    /// DOM element id the web host binds this button to
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Up => "pad-up",
            TouchButton::Down => "pad-down",
            TouchButton::Left => "pad-left",
            TouchButton::Right => "pad-right",
            TouchButton::A => "pad-a",
            TouchButton::B => "pad-b",
        }
    }

    pub fn press(&self, latch: &mut InputLatch) {
        latch.key_down(self.key());
    }

    pub fn release(&self, latch: &mut InputLatch) {
        latch.key_up(self.key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_are_released() {
        let latch = InputLatch::new();
        assert!(!latch.is_held("arrowleft"));
        assert!(!latch.is_held("q"));
        assert_eq!(latch.snapshot(), TickInput::default());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut latch = InputLatch::new();
        latch.key_down("ArrowLeft");
        assert!(latch.is_held("arrowleft"));
        assert!(latch.is_held("ArrowLeft"));
        assert!(latch.snapshot().left);

        latch.key_up("ARROWLEFT");
        assert!(!latch.snapshot().left);
    }

    #[test]
    fn test_snapshot_maps_aliases() {
        let mut latch = InputLatch::new();
        latch.key_down("d");
        latch.key_down("w");
        let input = latch.snapshot();
        assert!(input.right && input.jump);
        assert!(!input.left && !input.confirm);

        // Space both jumps and confirms
        let mut latch = InputLatch::new();
        latch.key_down(" ");
        let input = latch.snapshot();
        assert!(input.jump && input.confirm);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_events() {
        let mut latch = InputLatch::new();
        latch.key_down("Enter");
        let input = latch.snapshot();
        latch.key_up("Enter");
        assert!(input.confirm);
        assert!(!latch.snapshot().confirm);
    }

    #[test]
    fn test_release_all() {
        let mut latch = InputLatch::new();
        latch.key_down("a");
        latch.key_down("w");
        latch.release_all();
        assert_eq!(latch.snapshot(), TickInput::default());
    }

    #[test]
    fn test_touch_buttons_drive_latch() {
        let mut latch = InputLatch::new();
        TouchButton::A.press(&mut latch);
        TouchButton::Right.press(&mut latch);
        let input = latch.snapshot();
        assert!(input.jump && input.right);

        TouchButton::A.release(&mut latch);
        TouchButton::B.press(&mut latch);
        let input = latch.snapshot();
        assert!(!input.jump && input.confirm);
    }

    #[test]
    fn test_prevent_default_keys() {
        assert!(InputLatch::prevents_default(" "));
        assert!(InputLatch::prevents_default("Enter"));
        assert!(!InputLatch::prevents_default("a"));
    }
}
