//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened fresh
//! for each copy so no handle is held between key presses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Copy `text` and describe the outcome for a toast
///
/// Failures are logged rather than returned; a missing clipboard is not
/// worth interrupting the inspector for.
pub fn copy_with_feedback(text: &str, what: &str) -> String {
    match copy_to_clipboard(text) {
        Ok(()) => {
            tracing::debug!(bytes = text.len(), "copied {} to clipboard", what);
            format!("✓ Copied {}", what)
        }
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            "✗ Failed to copy".to_string()
        }
    }
}
