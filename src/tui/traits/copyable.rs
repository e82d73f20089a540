//! Copyable trait for components that provide clipboard content
//!
//! Components that can export their content to the clipboard implement
//! this trait. Supports both human-readable and machine-readable formats.

use super::Component;

/// Trait for components that can provide content for the clipboard
///
/// # Two Copy Modes
///
/// - **Text** (`y`): Human-readable format for pasting into docs, chat, etc.
/// - **Data** (`Y`): Machine-readable JSON for scripting/analysis
pub trait Copyable: Component {
    /// Get human-readable text for clipboard
    ///
    /// Returns `None` if there's nothing to copy (e.g., empty panel).
    fn copy_text(&self) -> Option<String>;

    /// Get machine-readable data for clipboard
    ///
    /// Default implementation returns `None`.
    fn copy_data(&self) -> Option<String> {
        None
    }

    /// Get a description of what will be copied (for status messages)
    fn copy_description(&self) -> String {
        self.id().label().to_lowercase()
    }
}
