//! Input mapping
//!
//! Raw key names and pointer positions become screen-independent actions.
//! The app decides what an action means on the current screen.

/// A discrete player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Left,
    Right,
    /// Start from the menu, or restart after a crash
    Confirm,
    /// Back to the menu
    Back,
    /// Flip the sound on or off
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value
pub fn action_for_key(key: &str) -> Option<InputAction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(InputAction::Left),
        "ArrowRight" | "d" | "D" => Some(InputAction::Right),
        "Enter" | " " => Some(InputAction::Confirm),
        "Escape" => Some(InputAction::Back),
        "m" | "M" => Some(InputAction::ToggleMute),
        _ => None,
    }
}

/// Map a tap/click at `x` on a surface `width` wide: left half steers left
pub fn action_for_tap(x: f32, width: f32) -> Option<InputAction> {
    if width.is_nan() || width <= 0.0 || !x.is_finite() {
        return None;
    }
    if x < width / 2.0 {
        Some(InputAction::Left)
    } else {
        Some(InputAction::Right)
    }
}
