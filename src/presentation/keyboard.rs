//! Keyboard contract for the presentation
//!
//! The handler is a pure function of the key and the modal gate. Front ends
//! translate their own key events into [`NavKey`] and apply the outcome.

use super::location::Location;
use super::navigation::{NavIntent, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Space,
    Home,
    End,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Navigate(NavIntent),
    CloseModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    pub action: Option<KeyAction>,
    /// Suppress the platform default (page scroll on Space)
    pub prevent_default: bool,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn navigate(intent: NavIntent) -> Self {
        Self {
            action: Some(KeyAction::Navigate(intent)),
            prevent_default: false,
        }
    }
}

/// Map a key to an action. Navigation keys are dead while a modal is open;
/// Escape only acts on an open modal.
pub fn handle_key(key: NavKey, modal_open: bool) -> KeyOutcome {
    if modal_open {
        return match key {
            NavKey::Escape => KeyOutcome {
                action: Some(KeyAction::CloseModal),
                prevent_default: false,
            },
            _ => KeyOutcome::ignored(),
        };
    }

    match key {
        NavKey::ArrowLeft | NavKey::ArrowUp => KeyOutcome::navigate(NavIntent::Previous),
        NavKey::ArrowRight | NavKey::ArrowDown => KeyOutcome::navigate(NavIntent::Next),
        NavKey::Space => KeyOutcome {
            action: Some(KeyAction::Navigate(NavIntent::Next)),
            prevent_default: true,
        },
        NavKey::Home => KeyOutcome::navigate(NavIntent::First),
        NavKey::End => KeyOutcome::navigate(NavIntent::Last),
        NavKey::Escape => KeyOutcome::ignored(),
    }
}

impl<L: Location> Navigator<L> {
    /// Run the keyboard contract against the current modal gate
    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome {
        let outcome = handle_key(key, self.modal_open());
        match outcome.action {
            Some(KeyAction::Navigate(intent)) => {
                self.apply(intent);
            }
            Some(KeyAction::CloseModal) => self.close_modal(),
            None => {}
        }
        outcome
    }
}
