//! Generic tab group - exclusive choice between named panels
//!
//! A `TabGroup` owns a set of `TabButton`s and `TabPanel`s that are linked by
//! string key: a button declares which panel it controls, a panel declares
//! its own id. Exactly one button is active once the group is initialized,
//! and at most one panel is visible (zero if the active button's key matches
//! no panel).
//!
//! Buttons and panels can be added in any order. Nothing is activated until
//! `initialize()` is called, which happens once and selects the first button.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Separator drawn between buttons in the tab bar
const SEPARATOR: &str = "│";

/// Trigger that activates the panel named by `controls`
#[derive(Debug, Clone)]
pub struct TabButton {
    label: String,
    controls: String,
    active: bool,
    area: Option<Rect>,
}

impl TabButton {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn controls(&self) -> &str {
        &self.controls
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn title(&self) -> String {
        format!(" {} ", self.label)
    }
}

/// Named, scrollable block of read-only text
///
/// Long lines wrap at the panel width; scrolling moves through the wrapped
/// rows, so every character of the content can be brought into view.
#[derive(Debug, Clone)]
pub struct TabPanel {
    id: String,
    visible: bool,
    lines: Vec<Line<'static>>,
    /// `lines` wrapped to `rows_width` columns, rebuilt when either changes
    rows: Vec<Line<'static>>,
    rows_width: Option<usize>,
    scroll: ScrollState,
}

impl TabPanel {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Replace the panel's content wholesale and scroll back to the top
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.replace_content(lines);
        self.scroll.scroll_to_top();
    }

    /// Replace the content but keep the scroll position (re-styling)
    pub fn replace_content(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.rows_width = None;
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Plain-text rendition of the content, one line per row
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    fn render(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Rightmost column belongs to the scrollbar
        let width = area.width.saturating_sub(1).max(1);
        self.rewrap(width as usize);
        self.scroll
            .update_dimensions(self.rows.len(), area.height as usize);

        let start = self.scroll.offset();
        let end = (start + area.height as usize).min(self.rows.len());
        let visible = self.rows.get(start..end).unwrap_or_default().to_vec();

        let paragraph = Paragraph::new(visible).style(Style::default().fg(theme.fg));
        f.render_widget(
            paragraph,
            Rect {
                width: width.min(area.width),
                ..area
            },
        );
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal);
    }

    fn rewrap(&mut self, width: usize) {
        if self.rows_width == Some(width) {
            return;
        }
        self.rows = self
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect();
        self.rows_width = Some(width);
    }
}

/// Split `line` into rows at most `width` columns wide, keeping span styles
///
/// Breaks fall between characters; a character wider than `width` gets a
/// row to itself.
fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in &line.spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut row)).style(line.style));
                used = 0;
            }
            chunk.push(ch);
            used += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, span.style));
        }
    }
    rows.push(Line::from(row).style(line.style));
    rows
}

#[derive(Debug, Clone, Default)]
pub struct TabGroup {
    buttons: Vec<TabButton>,
    panels: Vec<TabPanel>,
    initialized: bool,
}

impl TabGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a button controlling the panel with id `controls`
    pub fn add_button(&mut self, label: impl Into<String>, controls: impl Into<String>) -> usize {
        self.buttons.push(TabButton {
            label: label.into(),
            controls: controls.into(),
            active: false,
            area: None,
        });
        self.buttons.len() - 1
    }

    /// Declare a panel
    ///
    /// A panel arriving after initialization becomes visible immediately if
    /// the active button already points at it.
    pub fn add_panel(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        let visible = self.active_button().is_some_and(|b| b.controls == id)
            && !self.panels.iter().any(|p| p.visible);
        self.panels.push(TabPanel {
            id,
            visible,
            lines: Vec::new(),
            rows: Vec::new(),
            rows_width: None,
            scroll: ScrollState::new(),
        });
        self.panels.len() - 1
    }

    /// Activate the first button once all children are declared
    ///
    /// Returns `false` if the group was already initialized or has no
    /// buttons yet (in which case it stays uninitialized).
    pub fn initialize(&mut self) -> bool {
        if self.initialized || self.buttons.is_empty() {
            return false;
        }
        self.initialized = true;
        self.activate(0)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Make button `index` the active one and show its panel
    ///
    /// Ignored before initialization and for unknown indices. A button whose
    /// key matches no panel still becomes active, with every panel hidden.
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.initialized || index >= self.buttons.len() {
            return false;
        }

        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.active = i == index;
        }
        for panel in &mut self.panels {
            panel.visible = false;
        }

        let key = &self.buttons[index].controls;
        match self.panels.iter_mut().find(|p| &p.id == key) {
            Some(panel) => panel.visible = true,
            None => tracing::debug!(controls = %key, "tab controls no panel"),
        }
        true
    }

    /// Activate the button after the current one, wrapping around
    pub fn activate_next(&mut self) -> bool {
        match self.active_index() {
            Some(i) => self.activate((i + 1) % self.buttons.len()),
            None => false,
        }
    }

    /// Activate the button before the current one, wrapping around
    pub fn activate_previous(&mut self) -> bool {
        match self.active_index() {
            Some(i) => self.activate((i + self.buttons.len() - 1) % self.buttons.len()),
            None => false,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.active)
    }

    pub fn active_button(&self) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.active)
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn panels(&self) -> &[TabPanel] {
        &self.panels
    }

    pub fn panel(&self, id: &str) -> Option<&TabPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn panel_mut(&mut self, id: &str) -> Option<&mut TabPanel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn visible_panel(&self) -> Option<&TabPanel> {
        self.panels.iter().find(|p| p.visible)
    }

    pub fn visible_panel_mut(&mut self) -> Option<&mut TabPanel> {
        self.panels.iter_mut().find(|p| p.visible)
    }

    /// Button drawn at terminal cell (`column`, `row`), if any
    pub fn button_at(&self, column: u16, row: u16) -> Option<usize> {
        self.buttons.iter().position(|b| {
            b.area
                .is_some_and(|area| area.contains(Position::new(column, row)))
        })
    }

    /// Draw the button strip on one line and remember where each button went
    pub fn render_bar(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::with_capacity(self.buttons.len() * 2);
        let mut x = area.x;
        let right = area.x.saturating_add(area.width);

        for (i, button) in self.buttons.iter_mut().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(theme.border)));
                x = x.saturating_add(SEPARATOR.width() as u16);
            }

            let title = button.title();
            let width = (title.width() as u16).min(right.saturating_sub(x));
            button.area = (width > 0).then(|| Rect::new(x, area.y, width, 1));
            x = x.saturating_add(width);

            let style = if button.active {
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.muted)
            };
            spans.push(Span::styled(title, style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Draw the visible panel, if there is one
    pub fn render_panel(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(panel) = self.visible_panel_mut() {
            panel.render(f, area, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn group() -> TabGroup {
        let mut group = TabGroup::new();
        group.add_button("One", "one");
        group.add_button("Two", "two");
        group.add_panel("one");
        group.add_panel("two");
        group
    }

    fn visible_ids(group: &TabGroup) -> Vec<&str> {
        group
            .panels()
            .iter()
            .filter(|p| p.is_visible())
            .map(|p| p.id())
            .collect()
    }

    #[test]
    fn test_nothing_active_before_initialize() {
        let mut group = group();
        assert_eq!(group.active_index(), None);
        assert!(visible_ids(&group).is_empty());
        assert!(!group.activate(1));
        assert_eq!(group.active_index(), None);
    }

    #[test]
    fn test_initialize_activates_first_tab_once() {
        let mut group = group();
        assert!(group.initialize());
        assert_eq!(group.active_index(), Some(0));
        assert_eq!(visible_ids(&group), vec!["one"]);

        group.activate(1);
        assert!(!group.initialize());
        assert_eq!(group.active_index(), Some(1));
    }

    #[test]
    fn test_initialize_without_buttons_waits() {
        let mut group = TabGroup::new();
        group.add_panel("one");
        assert!(!group.initialize());
        assert!(!group.is_initialized());

        group.add_button("One", "one");
        assert!(group.initialize());
        assert_eq!(visible_ids(&group), vec!["one"]);
    }

    #[test]
    fn test_panels_declared_before_buttons() {
        let mut group = TabGroup::new();
        group.add_panel("two");
        group.add_panel("one");
        group.add_button("One", "one");
        group.add_button("Two", "two");
        group.initialize();
        assert_eq!(visible_ids(&group), vec!["one"]);
    }

    #[test]
    fn test_late_panel_shown_if_active() {
        let mut group = TabGroup::new();
        group.add_button("One", "one");
        group.initialize();
        assert!(visible_ids(&group).is_empty());

        group.add_panel("one");
        assert_eq!(visible_ids(&group), vec!["one"]);
    }

    #[test]
    fn test_switching_hides_previous_panel() {
        let mut group = group();
        group.initialize();
        for i in [1, 0, 1, 1, 0] {
            assert!(group.activate(i));
            assert_eq!(group.buttons().iter().filter(|b| b.is_active()).count(), 1);
            assert_eq!(visible_ids(&group).len(), 1);
            assert_eq!(
                visible_ids(&group)[0],
                group.active_button().unwrap().controls()
            );
        }
    }

    #[test]
    fn test_dangling_key_hides_everything() {
        let mut group = group();
        group.add_button("Ghost", "nowhere");
        group.initialize();

        assert!(group.activate(2));
        assert_eq!(group.active_index(), Some(2));
        assert!(visible_ids(&group).is_empty());
        assert!(group.visible_panel().is_none());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut group = group();
        group.initialize();
        assert!(!group.activate(7));
        assert_eq!(group.active_index(), Some(0));
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut group = group();
        group.initialize();
        group.activate_next();
        assert_eq!(group.active_index(), Some(1));
        group.activate_next();
        assert_eq!(group.active_index(), Some(0));
        group.activate_previous();
        assert_eq!(group.active_index(), Some(1));
    }

    #[test]
    fn test_set_content_resets_scroll() {
        let mut group = group();
        let panel = group.panel_mut("one").unwrap();
        panel.set_content((0..50).map(|i| Line::from(i.to_string())).collect());
        panel.scroll_mut().update_dimensions(50, 10);
        panel.scroll_mut().scroll_down();
        assert_eq!(panel.scroll().offset(), 1);

        panel.set_content(vec![Line::from("fresh")]);
        assert_eq!(panel.scroll().offset(), 0);
        assert_eq!(panel.text(), "fresh");
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_scrolls_past_u16_rows() {
        let mut group = group();
        group.initialize();
        let panel = group.panel_mut("one").unwrap();
        panel.set_content((0..70_010).map(|i| Line::from(format!("line {}", i))).collect());

        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|f| group.render_panel(f, f.area(), &theme))
            .unwrap();
        group.panel_mut("one").unwrap().scroll_mut().scroll_to_bottom();
        terminal
            .draw(|f| group.render_panel(f, f.area(), &theme))
            .unwrap();

        assert_eq!(group.panel("one").unwrap().scroll().offset(), 70_005);
        assert!(row_text(&terminal, 0).starts_with("line 70005"));
        assert!(row_text(&terminal, 4).starts_with("line 70009"));
    }

    #[test]
    fn test_long_lines_wrap_into_view() {
        let mut group = group();
        group.initialize();
        let long = format!("{}TAIL", "x".repeat(40));
        group
            .panel_mut("one")
            .unwrap()
            .set_content(vec![Line::from(long), Line::from("next")]);

        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|f| group.render_panel(f, f.area(), &theme))
            .unwrap();

        // 19 text columns: 44 chars take three rows
        assert_eq!(group.panel("one").unwrap().scroll().total(), 4);
        assert!(row_text(&terminal, 2).starts_with("xxTAIL"));
        assert!(row_text(&terminal, 3).starts_with("next"));
    }

    #[test]
    fn test_wrap_keeps_styles_and_wide_chars() {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let line = Line::from(vec![Span::raw("ab"), Span::styled("cd", bold)]);
        let rows = wrap_line(&line, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].spans[1].content, "c");
        assert_eq!(rows[0].spans[1].style, bold);
        assert_eq!(rows[1].spans[0].content, "d");
        assert_eq!(rows[1].spans[0].style, bold);

        // Two-column characters never straddle a break
        let rows = wrap_line(&Line::from("日本語"), 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].spans[0].content, "語");

        assert_eq!(wrap_line(&Line::default(), 10).len(), 1);
    }

    #[test]
    fn test_replace_content_keeps_scroll() {
        let mut group = group();
        let panel = group.panel_mut("one").unwrap();
        panel.set_content((0..50).map(|i| Line::from(i.to_string())).collect());
        panel.scroll_mut().update_dimensions(50, 10);
        panel.scroll_mut().page_down();
        let offset = panel.scroll().offset();
        assert!(offset > 0);

        panel.replace_content((0..50).map(|i| Line::from(format!("#{}", i))).collect());
        assert_eq!(panel.scroll().offset(), offset);
        assert!(panel.text().starts_with("#0"));
    }

    #[test]
    fn test_render_bar_records_button_areas() {
        let mut group = group();
        group.initialize();
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(30, 1)).unwrap();
        terminal
            .draw(|f| group.render_bar(f, f.area(), &theme))
            .unwrap();

        // " One " spans columns 0..5, separator at 5, " Two " from 6
        assert_eq!(group.button_at(0, 0), Some(0));
        assert_eq!(group.button_at(4, 0), Some(0));
        assert_eq!(group.button_at(5, 0), None);
        assert_eq!(group.button_at(6, 0), Some(1));
        assert_eq!(group.button_at(6, 1), None);
    }
}
