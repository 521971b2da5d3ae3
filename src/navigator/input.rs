//! Static routing of keyboard and swipe input to navigator actions.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Operation an input event maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Play the next effect, or advance.
    DispatchEffect,
    /// Jump the next effect to its end state, or advance.
    SkipEffect,
    /// Settle every effect of the slide, or advance.
    SkipAllEffects,
    /// Undo the last effect, or go back.
    RewindEffect,
    /// Undo every effect of the slide, or go back.
    RewindAllEffects,
    /// Show the first slide.
    FirstSlide,
    /// Show the last slide.
    LastSlide,
    /// End the show. Honoured even while input is disabled.
    Quit,
}

/// Direction of a touch swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Finger moved left.
    Left,
    /// Finger moved right.
    Right,
    /// Finger moved up.
    Up,
    /// Finger moved down.
    Down,
}

/// Pointer button of a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Button 0.
    Primary,
    /// Button 1.
    Middle,
    /// Button 2; always goes back one slide.
    Secondary,
}

impl MouseButton {
    /// Button for a DOM-style button index; unknown indices are `None`.
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

static KEY_ACTIONS: LazyLock<HashMap<&'static str, NavAction>> = LazyLock::new(|| {
    use NavAction::*;
    HashMap::from([
        ("Space", DispatchEffect),
        ("Enter", DispatchEffect),
        ("ArrowRight", DispatchEffect),
        ("KeyN", DispatchEffect),
        ("ArrowDown", SkipEffect),
        ("PageDown", SkipAllEffects),
        ("ArrowLeft", RewindEffect),
        ("ArrowUp", RewindEffect),
        ("Backspace", RewindEffect),
        ("KeyP", RewindEffect),
        ("PageUp", RewindAllEffects),
        ("Home", FirstSlide),
        ("End", LastSlide),
        ("Escape", Quit),
    ])
});

/// Action bound to a key code (`KeyboardEvent.code` naming); `None` when unmapped.
pub fn key_action(code: &str) -> Option<NavAction> {
    KEY_ACTIONS.get(code).copied()
}

/// Action bound to a swipe.
pub fn swipe_action(direction: SwipeDirection) -> NavAction {
    match direction {
        SwipeDirection::Left => NavAction::DispatchEffect,
        SwipeDirection::Right => NavAction::RewindEffect,
        SwipeDirection::Up => NavAction::SkipAllEffects,
        SwipeDirection::Down => NavAction::RewindAllEffects,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigator/input.rs"]
mod tests;
