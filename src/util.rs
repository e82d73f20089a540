//! Shared utility functions

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_width` display columns, ending in `…`
///
/// Uses unicode display width (not byte length), so wide CJK characters and
/// emoji count as two columns. Strings that already fit are returned as-is.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave room for the ellipsis (1 column)
    let target_width = max_width - 1;
    let mut current_width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        current_width += char_width;
        out.push(c);
    }
    out.push('…');
    out
}
