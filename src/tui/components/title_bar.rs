// Title bar component
//
// Renders the app name, the data source and how many exchanges were loaded.

use super::exchange_list::ListState;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let list = &app.exchange_list;

    let count = match list.state() {
        ListState::Unmounted | ListState::Loading => "loading".to_string(),
        ListState::Empty => "no exchanges".to_string(),
        ListState::Ready => match list.rows().len() {
            1 => "1 exchange".to_string(),
            n => format!("{} exchanges", n),
        },
    };

    let line = Line::from(vec![
        Span::styled(
            " vex ",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("─ {} ", app.source_label),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("({})", count), Style::default().fg(theme.fg)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}
