//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::KioskAction;

use super::app::{InputMode, KioskApp};

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut KioskApp, key: KeyEvent) {
    // Global bindings
    if let KeyCode::Char('c') = key.code {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            app.should_quit = true;
            return;
        }
    }

    match app.input_mode {
        InputMode::EditingName => handle_name_key(app, key),
        InputMode::Normal => handle_command_key(app, key),
    }
}

fn handle_command_key(app: &mut KioskApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('s') => app.request(KioskAction::StartCamera),
        KeyCode::Char('x') => app.request(KioskAction::StopCamera),
        KeyCode::Char('t') => app.request(KioskAction::Train),
        KeyCode::Char('m') => app.request(KioskAction::MarkAttendance),
        KeyCode::Char('d') => app.request(KioskAction::DownloadToday),
        KeyCode::Char('v') => app.open_video(),
        KeyCode::Char('r') | KeyCode::Tab => app.input_mode = InputMode::EditingName,
        _ => {}
    }
}

fn handle_name_key(app: &mut KioskApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_name(),
        KeyCode::Esc | KeyCode::Tab => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.name_input.pop();
        }
        KeyCode::Char(c) => app.name_input.push(c),
        _ => {}
    }
}
