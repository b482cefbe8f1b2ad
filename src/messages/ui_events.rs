//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::form::FormField;
use crate::models::VoteKind;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Category filter
    /// Filter bar position: 0 is "All", then the registry
    SelectFilter(usize),
    NextCategory,
    PrevCategory,
    Reload,

    // Quote list
    SelectNext,
    SelectPrev,
    Vote(VoteKind),
    OpenSource,

    // Submission form
    ToggleForm,
    CloseForm,
    NextField,
    PrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextCategoryChoice,
    PrevCategoryChoice,
    Submit,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissNotification,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    form_open: bool,
    focused_field: FormField,
    show_help: bool,
    show_notification: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Popups swallow the key
    if show_notification {
        return Some(UiEvent::DismissNotification);
    }
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if form_open {
        handle_form_keys(key, focused_field)
    } else {
        handle_list_keys(key)
    }
}

/// Keys while the submission form has focus
fn handle_form_keys(key: KeyEvent, focused_field: FormField) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CloseForm),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Submit),
        _ if focused_field == FormField::Category => match key.code {
            KeyCode::Left => Some(UiEvent::PrevCategoryChoice),
            KeyCode::Right | KeyCode::Char(' ') => Some(UiEvent::NextCategoryChoice),
            _ => None,
        },
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

/// Keys while browsing the list
fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('n') => Some(UiEvent::ToggleForm),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::PrevCategory),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::NextCategory),
        KeyCode::Char('a') => Some(UiEvent::SelectFilter(0)),
        KeyCode::Char(c @ '0'..='9') => c.to_digit(10).map(|d| UiEvent::SelectFilter(d as usize)),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char('i') => Some(UiEvent::Vote(VoteKind::Interesting)),
        KeyCode::Char('m') => Some(UiEvent::Vote(VoteKind::Mindblowing)),
        KeyCode::Char('f') => Some(UiEvent::Vote(VoteKind::False)),
        KeyCode::Char('o') | KeyCode::Enter => Some(UiEvent::OpenSource),
        _ => None,
    }
}
