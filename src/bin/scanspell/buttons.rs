//! Clickable regions drawn by the writer and hit-tested by the event loop.

use std::sync::{Arc, RwLock};

/// Action bound to an on-screen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ButtonAction {
    /// Same as pressing the switch.
    Select,
}

/// A button region in absolute terminal cells (1-based, inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Button {
    pub(crate) start_x: u16,
    pub(crate) end_x: u16,
    pub(crate) y: u16,
    pub(crate) action: ButtonAction,
}

/// Shared between the writer thread (which knows where buttons landed) and the
/// event loop (which receives clicks).
#[derive(Debug, Default, Clone)]
pub(crate) struct ButtonRegistry {
    buttons: Arc<RwLock<Vec<Button>>>,
}

impl ButtonRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Swap in the buttons of a freshly drawn frame.
    pub(crate) fn replace(&self, buttons: Vec<Button>) {
        if let Ok(mut current) = self.buttons.write() {
            *current = buttons;
        }
    }

    pub(crate) fn find_at(&self, x: u16, y: u16) -> Option<ButtonAction> {
        let buttons = self.buttons.read().ok()?;
        buttons
            .iter()
            .find(|button| button.y == y && (button.start_x..=button.end_x).contains(&x))
            .map(|button| button.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_button_under_click() {
        let registry = ButtonRegistry::new();
        registry.replace(vec![Button {
            start_x: 3,
            end_x: 12,
            y: 20,
            action: ButtonAction::Select,
        }]);
        assert_eq!(registry.find_at(3, 20), Some(ButtonAction::Select));
        assert_eq!(registry.find_at(12, 20), Some(ButtonAction::Select));
        assert_eq!(registry.find_at(13, 20), None);
        assert_eq!(registry.find_at(5, 19), None);
    }

    #[test]
    fn replace_drops_old_regions() {
        let registry = ButtonRegistry::new();
        registry.replace(vec![Button {
            start_x: 1,
            end_x: 4,
            y: 2,
            action: ButtonAction::Select,
        }]);
        registry.replace(Vec::new());
        assert_eq!(registry.find_at(2, 2), None);
    }
}
