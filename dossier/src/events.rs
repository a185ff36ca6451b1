//! Event handling for the dossier TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, View};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App<'_>, event: Event) -> EventResult {
    let result = match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    };

    if app.should_quit {
        EventResult::Quit
    } else {
        result
    }
}

/// Handle a mouse event
fn handle_mouse_event(app: &mut App<'_>, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.move_selection(-1);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.move_selection(1);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App<'_>, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Any key dismisses a message box
    if app.has_message() {
        app.dismiss_message();
        return EventResult::NeedsRedraw;
    }

    match app.view() {
        View::Search => handle_search_key(app, key),
        View::Record { .. } => handle_record_key(app, key),
        _ => handle_list_key(app, key),
    }
}

/// Keys shared by every list-like screen
fn handle_list_key(app: &mut App<'_>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.back();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(-1);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.move_selection(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.move_selection(-10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.move_selection(isize::MIN);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.move_selection(isize::MAX);
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.select();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys on the record detail screen
fn handle_record_key(app: &mut App<'_>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('r') => {
            app.open_related();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('e') => {
            app.open_events();
            EventResult::NeedsRedraw
        }
        _ => handle_list_key(app, key),
    }
}

/// Keys at the search prompt (free text input)
fn handle_search_key(app: &mut App<'_>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.clear_input();
            app.back();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            app.submit_search();
            EventResult::NeedsRedraw
        }

        // Input editing
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Up => {
            app.history_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            app.history_next();
            EventResult::NeedsRedraw
        }

        // Character input
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}
