// Application state for the inspector
//
// The App owns the two panes and the plumbing between them, but it never
// copies data from one pane to the other: the list publishes selections on
// the bus, the detail pane drains its own subscription. The App only decides
// *when* each step runs relative to drawing.

use crate::config::Config;
use crate::events::SelectionBus;
use crate::logging::LogBuffer;
use crate::scheduler::Scheduler;
use crate::tui::components::detail_tabs::DetailTabs;
use crate::tui::components::exchange_list::{ExchangeList, FetchOutcome};
use crate::tui::components::Toast;
use crate::tui::theme::{Theme, ThemeKind};
use crate::tui::traits::{ComponentId, Copyable, Handled, Interactive};
use crossterm::event::KeyEvent;
use std::time::Instant;

pub struct App {
    pub exchange_list: ExchangeList,
    pub detail_tabs: DetailTabs,
    pub scheduler: Scheduler,

    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub focus: ComponentId,

    /// Captured log events; the status bar shows the latest problem
    pub log_buffer: LogBuffer,

    /// Where exchanges are loaded from, for the title bar
    pub source_label: String,

    pub toast: Option<Toast>,
    pub should_quit: bool,
}

impl App {
    /// Assemble the panes around one selection bus
    ///
    /// The detail pane subscribes here, before anything is fetched, so it
    /// can never miss the first selection.
    pub fn new(
        bus: &SelectionBus,
        config: &Config,
        log_buffer: LogBuffer,
        source_label: impl Into<String>,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            exchange_list: ExchangeList::new(bus.publisher(), config.auto_select_delay()),
            detail_tabs: DetailTabs::new(bus.subscribe()),
            scheduler: Scheduler::new(),
            theme_kind,
            theme: theme_kind.theme(),
            focus: ComponentId::default(),
            log_buffer,
            source_label: source_label.into(),
            toast: None,
            should_quit: false,
        }
    }

    /// Hand the fetch outcome to the list
    pub fn load(&mut self, outcome: FetchOutcome) {
        self.exchange_list.load(outcome, &mut self.scheduler);
    }

    /// Let subscribers catch up with published notifications
    pub fn sync_notifications(&mut self) -> bool {
        self.detail_tabs.sync(&self.theme)
    }

    /// Run deferred tasks that are due; returns whether any ran
    ///
    /// Must only be called after a frame has been drawn.
    pub fn run_due_tasks(&mut self, now: Instant) -> bool {
        let due = self.scheduler.take_due(now);
        let ran = !due.is_empty();
        for task in due {
            tracing::trace!(?task, "running deferred task");
            self.exchange_list.run_task(task);
        }
        ran
    }

    /// Earliest moment something needs the loop's attention
    pub fn next_deadline(&self) -> Option<Instant> {
        let toast = self.toast.as_ref().map(Toast::deadline);
        match (self.scheduler.next_deadline(), toast) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus();
    }

    /// Route a key to whichever pane has focus
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::ExchangeList => self.exchange_list.handle_key(key),
            ComponentId::DetailTabs => self.detail_tabs.handle_key(key),
        }
    }

    /// Route a left click to the pane drawn under it, focusing that pane
    pub fn handle_click(&mut self, column: u16, row: u16) -> Handled {
        if self.exchange_list.handle_click(column, row).was_handled() {
            self.focus = ComponentId::ExchangeList;
            return Handled::Yes;
        }
        if self.detail_tabs.handle_click(column, row).was_handled() {
            self.focus = ComponentId::DetailTabs;
            return Handled::Yes;
        }
        Handled::No
    }

    /// Hint for the focused pane
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::ExchangeList => self.exchange_list.focus_hint(),
            ComponentId::DetailTabs => self.detail_tabs.focus_hint(),
        }
    }

    /// Human-readable copy of the focused pane, with a description
    pub fn copy_focused_text(&self) -> Option<(String, String)> {
        match self.focus {
            ComponentId::ExchangeList => self
                .exchange_list
                .copy_text()
                .map(|t| (t, self.exchange_list.copy_description())),
            ComponentId::DetailTabs => self
                .detail_tabs
                .copy_text()
                .map(|t| (t, self.detail_tabs.copy_description())),
        }
    }

    /// Selected exchange as JSON
    pub fn copy_selected_json(&self) -> Option<String> {
        self.exchange_list.copy_data()
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        self.detail_tabs.restyle(&self.theme);
        tracing::debug!(theme = self.theme_kind.name(), "theme changed");
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Drop the toast once it has been up long enough
    pub fn expire_toast(&mut self) -> bool {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Notification;
    use crate::model::{Exchange, Message, StatusCode};
    use crate::tui::components::detail_tabs::{REQUEST_TAB, RESPONSE_TAB};
    use crossterm::event::KeyCode;

    fn exchange(path: &str, status: u16) -> Exchange {
        Exchange {
            method: "GET".to_string(),
            path: path.to_string(),
            status: StatusCode::from(status),
            request: Message::new(format!("X-Path: {}", path), None),
            response: Message::new("", Some(format!("body of {}", path))),
        }
    }

    fn app() -> (App, SelectionBus) {
        let bus = SelectionBus::default();
        let mut config = Config::default();
        config.auto_select_delay_ms = 0;
        let app = App::new(&bus, &config, LogBuffer::new(), "test");
        (app, bus)
    }

    #[test]
    fn test_first_row_reaches_detail_after_deferred_tick() {
        let (mut app, _bus) = app();
        app.load(Ok(vec![exchange("/a", 200), exchange("/b", 404)]));

        // Before the tick: nothing selected, detail empty
        assert!(!app.sync_notifications());
        assert!(app.detail_tabs.current().is_none());

        assert!(app.run_due_tasks(Instant::now()));
        assert!(app.sync_notifications());
        assert_eq!(app.detail_tabs.current(), Some(&exchange("/a", 200)));
        assert_eq!(
            app.detail_tabs.panel_text(RESPONSE_TAB).unwrap(),
            "Headers\n\nBody\nbody of /a"
        );
    }

    #[test]
    fn test_observer_added_during_assembly_sees_first_selection() {
        let (mut app, bus) = app();
        app.load(Ok(vec![exchange("/a", 200)]));
        // A second observer attached after load, before the tick
        let mut late = bus.subscribe();

        app.run_due_tasks(Instant::now());
        assert_eq!(
            late.try_next(),
            Some(Notification::ItemSelected {
                item: exchange("/a", 200)
            })
        );
    }

    #[test]
    fn test_keys_go_to_focused_pane() {
        let (mut app, _bus) = app();
        app.load(Ok(vec![exchange("/a", 200), exchange("/b", 301)]));
        app.run_due_tasks(Instant::now());

        app.dispatch_to_focused(KeyEvent::from(KeyCode::Down));
        app.sync_notifications();
        assert_eq!(app.detail_tabs.current().unwrap().path, "/b");
        assert!(app
            .detail_tabs
            .panel_text(REQUEST_TAB)
            .unwrap()
            .contains("X-Path: /b"));

        app.focus_next();
        assert_eq!(app.focus, ComponentId::DetailTabs);
        app.dispatch_to_focused(KeyEvent::from(KeyCode::Right));
        assert_eq!(app.detail_tabs.tabs().active_index(), Some(1));
        assert_eq!(app.exchange_list.active_index(), Some(1));
    }

    #[test]
    fn test_failed_load_never_selects() {
        let (mut app, _bus) = app();
        app.load(Err(anyhow::anyhow!("boom")));
        assert!(!app.run_due_tasks(Instant::now()));
        assert!(!app.sync_notifications());
        assert!(app.next_deadline().is_none());
    }

    #[test]
    fn test_theme_cycle_keeps_content() {
        let (mut app, _bus) = app();
        let theme = app.theme.clone();
        app.detail_tabs.show(exchange("/a", 200), &theme);
        let before = app.detail_tabs.panel_text(REQUEST_TAB);
        app.next_theme();
        assert_eq!(app.theme_kind, ThemeKind::Light);
        assert_eq!(app.detail_tabs.panel_text(REQUEST_TAB), before);
    }
}
