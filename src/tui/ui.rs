// UI rendering logic
//
// One function draws the whole frame: title bar, the two panes, status bar,
// and the toast overlay on top. Components record where they were drawn
// during this pass, which is what mouse clicks are later hit-tested against.

use super::app::App;
use super::components::{status_bar, title_bar};
use super::layout::Breakpoint;
use super::traits::{Component, RenderContext};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg, f.area());

    // Title (1 line), panes (rest), status (2 lines incl. top border)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);

    let (direction, constraints) = Breakpoint::from_width(chunks[1].width).pane_split();
    let panes = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(chunks[1]);

    let ctx = RenderContext::new(&app.theme, app.focus);
    app.exchange_list.render(f, panes[0], &ctx);
    app.detail_tabs.render(f, panes[1], &ctx);

    status_bar::render(f, chunks[2], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
