//! Keybinding definitions.
//!
//! Two maps, depending on whether a text field can have focus. On the
//! habit list every printable key is free to be a command; on the form
//! screens only control sequences and navigation keys are commands, and
//! everything else falls through to the focused widget.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Submit,
    NextField,
    PrevField,
    SwitchAuthMode,
    Back,
    MoveUp,
    MoveDown,
    Complete,
    Delete,
    NewHabit,
    SignOut,
    Refresh,
}

/// Keys for the habit list, where no text input has focus.
pub fn map_list_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => Some(Action::Complete),
        KeyCode::Char('d') | KeyCode::Char('x') => Some(Action::Delete),
        KeyCode::Char('n') | KeyCode::Char('a') => Some(Action::NewHabit),
        KeyCode::Char('s') => Some(Action::SignOut),
        KeyCode::Char('r') => Some(Action::Refresh),
        _ => None,
    }
}

/// Command keys on the form screens. Returns `None` for anything the
/// focused widget should see instead.
pub fn map_form_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::SwitchAuthMode),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}
