// Status bar component
//
// Renders the focused pane's key hints, and the most recent warning or error
// from the log buffer when there is one.

use crate::logging::LogLevel;
use crate::tui::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = Vec::new();

    let hint = app.focus_hint().unwrap_or("");
    let keys = format!(" {}  t:theme  q:quit ", hint);
    let used = keys.width();
    spans.push(Span::styled(keys, Style::default().fg(theme.status_bar)));

    if let Some(entry) = app.log_buffer.last_problem() {
        let color = match entry.level {
            LogLevel::Error => theme.log_error,
            _ => theme.log_warn,
        };
        let room = (area.width as usize).saturating_sub(used + 3);
        let text = truncate_to_width(
            &format!("{} {}", entry.level.as_str(), entry.message),
            room,
        );
        spans.push(Span::styled("│ ", Style::default().fg(theme.border)));
        spans.push(Span::styled(text, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(status, area);
}
