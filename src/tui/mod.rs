// TUI module - the inspector's terminal interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard and mouse input, redraw ticks, fetch completion)
// - Ordering deferred work strictly after each frame is drawn

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::events::SelectionBus;
use crate::logging::LogBuffer;
use crate::source::ExchangeSource;
use anyhow::{Context, Result};
use app::App;
use components::exchange_list::FetchOutcome;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Run the inspector against `source` until the user quits
///
/// Sets up the terminal, mounts the exchange list (which issues its one
/// fetch), runs the event loop, and restores the terminal whatever the
/// loop's outcome.
pub async fn run_tui<S: ExchangeSource>(
    source: S,
    config: &Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Every observer is wired up before the list is mounted
    let bus = SelectionBus::default();
    let mut app = App::new(&bus, config, log_buffer, source.describe());

    let (fetch_tx, mut fetch_rx) = mpsc::channel::<FetchOutcome>(1);
    app.exchange_list.mount(source, fetch_tx);

    let result = run_event_loop(&mut terminal, &mut app, &mut fetch_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each iteration: deliver pending notifications, draw, then run deferred
/// tasks that are due. A task that ran may have published something, so the
/// loop goes straight round to draw again. Only when nothing is due does it
/// wait on input, the redraw tick, the fetch, or the next deadline.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetch_rx: &mut mpsc::Receiver<FetchOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        app.sync_notifications();
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        if app.should_quit {
            break;
        }

        // Deferred work only ever sees a frame that is already on screen
        if app.run_due_tasks(Instant::now()) {
            continue;
        }

        let deadline = app.next_deadline();

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.expire_toast();
            }

            // The list's one fetch
            Some(outcome) = fetch_rx.recv() => {
                app.load(outcome);
            }

            // Scheduled task or toast expiry
            _ = sleep_until(deadline) => {
                app.expire_toast();
            }
        }
    }

    Ok(())
}

/// Sleep until `deadline`, or forever if there is none
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Handle keyboard input
/// Layered dispatch: Global → Focused component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }
    if handle_global_keys(app, &key_event) {
        return;
    }
    app.dispatch_to_focused(key_event);
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
            true
        }
        // Raw mode swallows SIGINT
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            true
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus_next();
            true
        }
        KeyCode::Char('t') => {
            app.next_theme();
            true
        }
        // Copy to clipboard: y = focused pane as text, Y = selected exchange as JSON
        KeyCode::Char('y') => {
            if let Some((text, what)) = app.copy_focused_text() {
                let message = clipboard::copy_with_feedback(&text, &what);
                app.show_toast(message);
            }
            true
        }
        KeyCode::Char('Y') => {
            if let Some(json) = app.copy_selected_json() {
                let message = clipboard::copy_with_feedback(&json, "exchange JSON");
                app.show_toast(message);
            }
            true
        }
        _ => false,
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.handle_click(mouse_event.column, mouse_event.row);
        }
        MouseEventKind::ScrollUp => {
            // Synthesize Up key event for trait dispatch
            let key_event = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
            app.dispatch_to_focused(key_event);
        }
        MouseEventKind::ScrollDown => {
            let key_event = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
            app.dispatch_to_focused(key_event);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Exchange, Message, StatusCode};
    use crate::tui::theme::ThemeKind;
    use crate::tui::traits::ComponentId;

    fn new_app() -> App {
        let mut config = Config::default();
        config.auto_select_delay_ms = 0;
        App::new(&SelectionBus::default(), &config, LogBuffer::new(), "test")
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        handle_key_event(&mut app, press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = new_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = new_app();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_and_theme_keys() {
        let mut app = new_app();
        handle_key_event(&mut app, press(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::DetailTabs);
        handle_key_event(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.focus, ComponentId::ExchangeList);

        handle_key_event(&mut app, press(KeyCode::Char('t')));
        assert_eq!(app.theme_kind, ThemeKind::Light);
    }

    #[test]
    fn test_wheel_moves_list_selection() {
        let mut app = new_app();
        app.load(Ok(vec![
            Exchange {
                method: "GET".to_string(),
                path: "/one".to_string(),
                status: StatusCode::from(200),
                request: Message::default(),
                response: Message::default(),
            },
            Exchange {
                method: "GET".to_string(),
                path: "/two".to_string(),
                status: StatusCode::from(500),
                request: Message::default(),
                response: Message::default(),
            },
        ]));
        app.run_due_tasks(Instant::now());

        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.exchange_list.active_index(), Some(1));
    }
}
