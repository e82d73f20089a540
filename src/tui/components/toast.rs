//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a short duration. Used
//! for clipboard feedback. Renders in the bottom-right corner on top of all
//! other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const DEFAULT_DURATION: Duration = Duration::from_secs(2);

pub struct Toast {
    pub message: String,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// When the toast should disappear
    pub fn deadline(&self) -> Instant {
        self.created_at + self.duration
    }

    /// Render the toast in the bottom-right corner of `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // 2 cells of padding plus the border on each side
        let message_width = u16::try_from(self.message.width()).unwrap_or(u16::MAX);
        let width = message_width
            .saturating_add(4)
            .min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .style(Style::default().bg(theme.bg));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.fg))
            .block(block);

        // Clear first so the toast sits on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_fresh_toast_not_expired() {
        let toast = Toast::new("✓ Copied");
        assert!(!toast.is_expired());
        assert!(toast.deadline() > Instant::now());
    }

    #[test]
    fn test_huge_message_is_clamped_to_area() {
        let toast = Toast::new("x".repeat(70_000));
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| toast.render(f, f.area(), &theme))
            .unwrap();

        // Box spans 36 columns ending two short of the right edge
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(2, 5)].symbol(), "┌");
        assert_eq!(buffer[(37, 5)].symbol(), "┐");
        assert_eq!(buffer[(38, 5)].symbol(), " ");
    }
}
