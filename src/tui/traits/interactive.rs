//! Interactive trait for components that handle keyboard and mouse input
//!
//! Components that can receive and process input events implement this
//! trait. The App routes keys to the focused component and mouse clicks to
//! whichever component was drawn under the pointer.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling an input event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up for global handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global handlers: q, Tab, y, Y)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
/// ```
pub trait Interactive: Component {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up to the App.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Handle a left click at terminal cell (`column`, `row`)
    ///
    /// Default ignores clicks. Components hit-test against the areas they
    /// recorded during their last render.
    fn handle_click(&mut self, _column: u16, _row: u16) -> Handled {
        Handled::No
    }

    /// Hint text for status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
