//! Exchange list component
//!
//! Owns the fetched exchange collection and the single-selection state among
//! its rows. Selecting a row publishes an `item-selected` notification; the
//! list has no idea who, if anyone, is listening.
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted ──mount()──▶ Loading ──load(Ok(non-empty))──▶ Ready
//!                            │
//!                            └──load(Err | Ok(empty))──▶ Empty ("No results found.")
//! ```
//!
//! Exactly one fetch is issued per list. After a successful load the first
//! row is clicked through the scheduler, which runs it only after the frame
//! showing the rows has been drawn.

use super::exchange_row::ExchangeRow;
use super::scrollbar::{render_scrollbar_raw, ScrollbarStyle};
use crate::events::{Notification, Publisher};
use crate::model::Exchange;
use crate::scheduler::{Scheduler, Task};
use crate::source::ExchangeSource;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;
use tokio::sync::mpsc;

/// Shown in place of rows when there is nothing to list
pub const NO_RESULTS: &str = "No results found.";

/// Result of the list's one fetch
pub type FetchOutcome = anyhow::Result<Vec<Exchange>>;

/// Rows moved per PageUp/PageDown
const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// No fetch issued yet
    Unmounted,
    /// Fetch in flight
    Loading,
    /// Fetch failed or returned nothing
    Empty,
    /// Rows available
    Ready,
}

pub struct ExchangeList {
    rows: Vec<ExchangeRow>,
    state: ListState,
    publisher: Publisher,
    auto_select_delay: Duration,
    /// First visible row
    offset: usize,
}

impl ExchangeList {
    pub fn new(publisher: Publisher, auto_select_delay: Duration) -> Self {
        Self {
            rows: Vec::new(),
            state: ListState::Unmounted,
            publisher,
            auto_select_delay,
            offset: 0,
        }
    }

    /// Start the list's single fetch
    ///
    /// The outcome is delivered on `tx` for the event loop to pass to
    /// [`ExchangeList::load`]. Returns `false` (and does nothing) if a fetch
    /// was already issued.
    pub fn mount<S: ExchangeSource>(&mut self, source: S, tx: mpsc::Sender<FetchOutcome>) -> bool {
        if self.state != ListState::Unmounted {
            tracing::debug!("exchange list already mounted, not fetching again");
            return false;
        }
        self.state = ListState::Loading;

        tracing::debug!(source = %source.describe(), "fetching exchanges");
        tokio::spawn(async move {
            let outcome = source.fetch().await;
            // Receiver gone means the UI already shut down
            let _ = tx.send(outcome).await;
        });
        true
    }

    /// Build rows from the fetch outcome
    ///
    /// Failures and empty collections both end in the "No results found."
    /// state; nothing is retried. Only the first outcome is applied.
    pub fn load(&mut self, outcome: FetchOutcome, scheduler: &mut Scheduler) {
        if matches!(self.state, ListState::Ready | ListState::Empty) {
            tracing::debug!("exchange list already loaded, ignoring outcome");
            return;
        }

        match outcome {
            Ok(exchanges) if !exchanges.is_empty() => {
                tracing::info!(count = exchanges.len(), "exchanges loaded");
                self.rows = exchanges.into_iter().map(ExchangeRow::new).collect();
                self.state = ListState::Ready;
                scheduler.defer(self.auto_select_delay, Task::ClickRow(0));
            }
            Ok(_) => {
                tracing::info!("no exchanges recorded yet");
                self.state = ListState::Empty;
            }
            Err(e) => {
                tracing::warn!("Failed to load exchanges: {:#}", e);
                self.state = ListState::Empty;
            }
        }
    }

    /// Make row `index` the only active row and announce it
    ///
    /// Returns `false` for an index with no row.
    pub fn click(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }

        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_active(i == index);
        }

        let item = self.rows[index].exchange().clone();
        tracing::debug!(index, method = %item.method, path = %item.path, "row selected");
        self.publisher.publish(Notification::ItemSelected { item });
        true
    }

    /// Execute a deferred task addressed to the list
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::ClickRow(index) => {
                self.click(index);
            }
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn rows(&self) -> &[ExchangeRow] {
        &self.rows
    }

    pub fn active_index(&self) -> Option<usize> {
        self.rows.iter().position(ExchangeRow::is_active)
    }

    pub fn active_exchange(&self) -> Option<&Exchange> {
        self.active_index().map(|i| self.rows[i].exchange())
    }

    /// Row drawn at terminal cell (`column`, `row`), if any
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.rows.iter().position(|r| r.hit(column, row))
    }

    /// Adjust the scroll offset so the active row stays visible
    fn update_offset(&mut self, height: usize) {
        let total = self.rows.len();
        if let Some(active) = self.active_index() {
            if active < self.offset {
                self.offset = active;
            } else if height > 0 && active >= self.offset + height {
                self.offset = active + 1 - height;
            }
        }
        self.offset = self.offset.min(total.saturating_sub(height));
    }

    fn title(&self) -> String {
        match (self.state, self.active_index()) {
            (ListState::Ready, Some(i)) => format!(" Exchanges ({}/{}) ", i + 1, self.rows.len()),
            (ListState::Ready, None) => format!(" Exchanges ({}) ", self.rows.len()),
            _ => " Exchanges ".to_string(),
        }
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Component for ExchangeList {
    fn id(&self) -> ComponentId {
        ComponentId::ExchangeList
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(ctx.is_focused(self.id())))
            .title(self.title());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let placeholder = match self.state {
            ListState::Unmounted => Some(""),
            ListState::Loading => Some("Loading…"),
            ListState::Empty => Some(NO_RESULTS),
            ListState::Ready => None,
        };
        if let Some(text) = placeholder {
            for row in &mut self.rows {
                row.set_area(None);
            }
            let style = if self.state == ListState::Empty {
                Style::default().fg(theme.fg)
            } else {
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC)
            };
            f.render_widget(Paragraph::new(text).style(style), inner);
            return;
        }

        let height = inner.height as usize;
        self.update_offset(height);
        let start = self.offset;
        let end = (start + height).min(self.rows.len());
        let width = inner.width as usize;

        let mut lines: Vec<Line> = Vec::with_capacity(end - start);
        for (i, row) in self.rows.iter_mut().enumerate() {
            if (start..end).contains(&i) {
                let y = inner.y + (i - start) as u16;
                row.set_area(Some(Rect::new(inner.x, y, inner.width, 1)));
                lines.push(row.line(theme, width));
            } else {
                row.set_area(None);
            }
        }

        f.render_widget(Paragraph::new(lines), inner);
        render_scrollbar_raw(
            f,
            area,
            self.rows.len(),
            height,
            start,
            ScrollbarStyle::Arrows,
        );
    }
}

impl Selectable for ExchangeList {
    fn selected_index(&self) -> Option<usize> {
        self.active_index()
    }

    fn select(&mut self, index: usize) {
        self.click(index.min(self.rows.len().saturating_sub(1)));
    }

    fn item_count(&self) -> usize {
        self.rows.len()
    }
}

impl Interactive for ExchangeList {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_last();
                Handled::Yes
            }
            KeyCode::PageUp => {
                if let Some(idx) = self.active_index() {
                    self.select(idx.saturating_sub(PAGE_ROWS));
                }
                Handled::Yes
            }
            KeyCode::PageDown => {
                match self.active_index() {
                    Some(idx) => self.select(idx + PAGE_ROWS),
                    None => self.select_first(),
                }
                Handled::Yes
            }
            KeyCode::Enter => {
                // Re-announce the current selection
                if let Some(idx) = self.active_index() {
                    self.click(idx);
                }
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Handled {
        match self.row_at(column, row) {
            Some(index) => Handled::from(self.click(index)),
            None => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  g/G:first/last  Tab:detail  y/Y:copy")
    }
}

impl Copyable for ExchangeList {
    fn copy_text(&self) -> Option<String> {
        self.active_exchange()
            .map(|e| format!("{} {} {}", e.status, e.method, e.path))
    }

    fn copy_data(&self) -> Option<String> {
        self.active_exchange()
            .and_then(|e| serde_json::to_string_pretty(e).ok())
    }

    fn copy_description(&self) -> String {
        "selected exchange".to_string()
    }
}
