//! Detail tabs - request/response view of the selected exchange
//!
//! Wraps a two-tab `TabGroup` ("Request", "Response"). Each panel shows a
//! Headers block and a Body block. The component is fed exclusively through
//! the `Subscription` it is constructed with: every `item-selected`
//! notification rewrites both panels from scratch.

use super::tabs::TabGroup;
use crate::events::{Notification, Subscription};
use crate::model::{Exchange, Message};
use crate::tui::theme::Theme;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
};
use crate::tui::scroll::ScrollState;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const REQUEST_TAB: &str = "request";
pub const RESPONSE_TAB: &str = "response";

pub const EMPTY_REQUEST_BODY: &str = "Empty request body";
pub const EMPTY_RESPONSE_BODY: &str = "Empty response body";

pub struct DetailTabs {
    group: TabGroup,
    subscription: Subscription,
    current: Option<Exchange>,
    /// Scroll state handed out when no panel is visible
    idle_scroll: ScrollState,
}

impl DetailTabs {
    pub fn new(subscription: Subscription) -> Self {
        let mut group = TabGroup::new();
        group.add_button("Request", REQUEST_TAB);
        group.add_button("Response", RESPONSE_TAB);
        group.add_panel(REQUEST_TAB);
        group.add_panel(RESPONSE_TAB);
        group.initialize();

        Self {
            group,
            subscription,
            current: None,
            idle_scroll: ScrollState::new(),
        }
    }

    /// Apply every pending notification
    ///
    /// Each one fully overwrites the panels, so only the last is visible.
    /// Returns whether anything changed.
    pub fn sync(&mut self, theme: &Theme) -> bool {
        let mut changed = false;
        while let Some(notification) = self.subscription.try_next() {
            match notification {
                Notification::ItemSelected { item } => {
                    self.show(item, theme);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Overwrite both panels from `exchange`
    pub fn show(&mut self, exchange: Exchange, theme: &Theme) {
        tracing::debug!(method = %exchange.method, path = %exchange.path, "showing exchange");
        for (id, message, placeholder) in [
            (REQUEST_TAB, &exchange.request, EMPTY_REQUEST_BODY),
            (RESPONSE_TAB, &exchange.response, EMPTY_RESPONSE_BODY),
        ] {
            if let Some(panel) = self.group.panel_mut(id) {
                panel.set_content(message_lines(message, placeholder, theme));
            }
        }
        self.current = Some(exchange);
    }

    /// Re-style panel content after a theme change, keeping scroll positions
    pub fn restyle(&mut self, theme: &Theme) {
        let Some(exchange) = &self.current else {
            return;
        };
        for (id, message, placeholder) in [
            (REQUEST_TAB, &exchange.request, EMPTY_REQUEST_BODY),
            (RESPONSE_TAB, &exchange.response, EMPTY_RESPONSE_BODY),
        ] {
            if let Some(panel) = self.group.panel_mut(id) {
                panel.replace_content(message_lines(message, placeholder, theme));
            }
        }
    }

    pub fn current(&self) -> Option<&Exchange> {
        self.current.as_ref()
    }

    pub fn tabs(&self) -> &TabGroup {
        &self.group
    }

    /// Plain text of panel `id`
    pub fn panel_text(&self, id: &str) -> Option<String> {
        self.group.panel(id).map(|p| p.text())
    }
}

/// Headers block followed by Body block
fn message_lines(message: &Message, placeholder: &str, theme: &Theme) -> Vec<Line<'static>> {
    let heading = theme.heading_style();
    let mut lines = vec![Line::styled("Headers", heading)];
    lines.extend(
        message
            .headers_display()
            .lines()
            .map(|l| Line::from(l.to_string())),
    );
    lines.push(Line::default());
    lines.push(Line::styled("Body", heading));

    let body_style = if message.body_or("").is_empty() {
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(theme.fg)
    };
    lines.extend(
        message
            .body_or(placeholder)
            .lines()
            .map(|l| Line::styled(l.to_string(), body_style)),
    );
    lines
}

impl Component for DetailTabs {
    fn id(&self) -> ComponentId {
        ComponentId::DetailTabs
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let title = match &self.current {
            Some(e) => format!(" {} {} ", e.method, e.path),
            None => " Detail ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(ctx.is_focused(self.id())))
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        self.group.render_bar(f, chunks[0], theme);

        if self.current.is_none() {
            let hint = Paragraph::new("Select an exchange to inspect it").style(
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            );
            f.render_widget(hint, chunks[2]);
            return;
        }
        self.group.render_panel(f, chunks[2], theme);
    }
}

impl Scrollable for DetailTabs {
    fn scroll_state(&self) -> &ScrollState {
        match self.group.visible_panel() {
            Some(panel) => panel.scroll(),
            None => &self.idle_scroll,
        }
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        match self.group.visible_panel_mut() {
            Some(panel) => panel.scroll_mut(),
            None => &mut self.idle_scroll,
        }
    }
}

impl Interactive for DetailTabs {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.group.activate_previous().into(),
            KeyCode::Right | KeyCode::Char('l') => self.group.activate_next().into(),
            KeyCode::Char('1') => self.group.activate(0).into(),
            KeyCode::Char('2') => self.group.activate(1).into(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_to_top();
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll_to_bottom();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Handled {
        match self.group.button_at(column, row) {
            Some(index) => self.group.activate(index).into(),
            None => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←→:tab  ↑↓:scroll  Tab:list  y:copy panel")
    }
}

impl Copyable for DetailTabs {
    fn copy_text(&self) -> Option<String> {
        self.current.as_ref()?;
        self.group.visible_panel().map(|p| p.text())
    }

    fn copy_data(&self) -> Option<String> {
        self.current
            .as_ref()
            .and_then(|e| serde_json::to_string_pretty(e).ok())
    }

    fn copy_description(&self) -> String {
        match self.group.active_button() {
            Some(button) => format!("{} panel", button.label().to_lowercase()),
            None => "detail".to_string(),
        }
    }
}
