//! Keyboard input dispatch — global keys → overlays → focus-specific handlers.
//!
//! Input focus: typing edits the symbol, Enter queues a run, Tab/Esc move to
//! the tables. Tables focus: j/k scroll, x exports, i or Tab edits the symbol,
//! q or Esc quits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay};

const PAGE: usize = 10;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 2. Overlays consume input first; any key dismisses them.
    if app.overlay != Overlay::None {
        app.overlay = Overlay::None;
        return;
    }

    // 3. Focus-specific keys.
    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Tables => handle_tables_key(app, key),
    }
}

fn handle_input_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.request_run();
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Tab => app.focus = Focus::Tables,
        KeyCode::Esc => {
            if app.output.is_some() {
                app.focus = Focus::Tables;
            } else {
                app.running = false;
            }
        }
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

fn handle_tables_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('x') => app.export_xlsx(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Char('g') | KeyCode::Home => app.scroll = 0,
        KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Tab => app.focus = Focus::Input,
        KeyCode::Char('e') => {
            if !app.error_history.is_empty() {
                app.overlay = Overlay::Error;
            }
        }
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Enter => {
            app.request_run();
        }
        _ => {}
    }
}
