//! Exchange row - one line in the exchange list
//!
//! Renders `[status] METHOD path`. The row never decides on its own whether
//! it is active; the owning list flips the `active` hook and the row only
//! reflects it in its styling.

use super::status_badge::StatusBadge;
use crate::model::Exchange;
use crate::tui::theme::Theme;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct ExchangeRow {
    exchange: Exchange,
    badge: StatusBadge,
    active: bool,
    /// Where the row was last drawn; `None` when scrolled out of view
    area: Option<Rect>,
}

impl ExchangeRow {
    pub fn new(exchange: Exchange) -> Self {
        let badge = StatusBadge::new(exchange.status.as_str());
        Self {
            exchange,
            badge,
            active: false,
            area: None,
        }
    }

    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    pub fn badge(&self) -> &StatusBadge {
        &self.badge
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// State hook toggled by the owning list
    pub(super) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(super) fn set_area(&mut self, area: Option<Rect>) {
        self.area = area;
    }

    /// Whether a click at (`column`, `row`) lands on this row
    pub fn hit(&self, column: u16, row: u16) -> bool {
        self.area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Styled line for this row, truncated to `width` columns
    pub fn line(&self, theme: &Theme, width: usize) -> Line<'static> {
        let badge = self.badge.span(theme);
        let method = format!(" {} ", self.exchange.method);
        let used = badge.content.width() + method.width();
        let path = truncate_to_width(&self.exchange.path, width.saturating_sub(used));

        let (method_style, path_style) = if self.active {
            let selected = theme.selected_style();
            (selected, selected.add_modifier(Modifier::ITALIC))
        } else {
            (
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                Style::default().fg(theme.fg).add_modifier(Modifier::ITALIC),
            )
        };

        let mut line = Line::from(vec![
            badge,
            Span::styled(method, method_style),
            Span::styled(path, path_style),
        ]);
        if self.active {
            line = line.style(Style::default().bg(theme.selected_bg));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, StatusCode};

    fn row() -> ExchangeRow {
        ExchangeRow::new(Exchange {
            method: "DELETE".to_string(),
            path: "/items/42".to_string(),
            status: StatusCode::from(204),
            request: Message::default(),
            response: Message::default(),
        })
    }

    #[test]
    fn test_row_renders_status_method_path() {
        let line = row().line(&Theme::dark(), 80);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " 204  DELETE /items/42");
    }

    #[test]
    fn test_row_starts_inactive() {
        let mut row = row();
        assert!(!row.is_active());
        row.set_active(true);
        assert!(row.is_active());
    }

    #[test]
    fn test_row_hit_uses_last_area() {
        let mut row = row();
        assert!(!row.hit(1, 1));

        row.set_area(Some(Rect::new(1, 3, 20, 1)));
        assert!(row.hit(1, 3));
        assert!(row.hit(20, 3));
        assert!(!row.hit(21, 3));
        assert!(!row.hit(5, 4));
    }

    #[test]
    fn test_row_truncates_long_path() {
        let line = row().line(&Theme::dark(), 15);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.width(), 15);
        assert!(text.ends_with('…'));
    }
}
